//! Entity marker trait and type descriptors.

use serde::Serialize;
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A type mapped to a Cassandra table.
///
/// ```rust
/// use cassandra_query::{Entity, EntityType};
///
/// struct Person;
///
/// impl Entity for Person {
///     const TABLE: &'static str = "person";
/// }
///
/// assert_eq!(EntityType::<Person>::of().table(), "person");
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Table the entity is mapped to.
    const TABLE: &'static str;
}

/// Runtime descriptor for the entity type `T`.
///
/// Data access interfaces receive one of these alongside every request so
/// they know which type to map rows into. It carries no data; all values of
/// `EntityType<T>` for the same `T` are equal.
pub struct EntityType<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityType<T> {
    /// Descriptor for `T`.
    #[must_use]
    pub const fn of() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Fully qualified Rust type name of `T`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Table `T` maps to.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        T::TABLE
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    /// Drop the static type, keeping identity, name and table.
    #[must_use]
    pub fn erased(&self) -> ErasedEntityType {
        ErasedEntityType {
            type_id: self.type_id(),
            name: self.name(),
            table: self.table(),
        }
    }
}

impl<T: Entity> Default for EntityType<T> {
    fn default() -> Self {
        Self::of()
    }
}

impl<T> Clone for EntityType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityType<T> {}

impl<T> PartialEq for EntityType<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for EntityType<T> {}

impl<T> Hash for EntityType<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T> fmt::Debug for EntityType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityType<{}>", type_name::<T>())
    }
}

/// Entity descriptor with the static type erased.
///
/// Used where descriptors of different entity types must be stored or
/// compared together, such as invocation logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErasedEntityType {
    #[serde(skip)]
    type_id: TypeId,
    name: &'static str,
    table: &'static str,
}

impl ErasedEntityType {
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Whether this descriptor was erased from `EntityType<T>`.
    #[must_use]
    pub fn is<T: Entity>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl<T: Entity> From<EntityType<T>> for ErasedEntityType {
    fn from(entity_type: EntityType<T>) -> Self {
        entity_type.erased()
    }
}

impl fmt::Display for ErasedEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person;

    impl Entity for Person {
        const TABLE: &'static str = "person";
    }

    struct Account;

    impl Entity for Account {
        const TABLE: &'static str = "account";
    }

    #[test]
    fn test_descriptor_reports_table_and_name() {
        let person = EntityType::<Person>::of();

        assert_eq!(person.table(), "person");
        assert!(person.name().ends_with("Person"));
        assert_eq!(person.type_id(), TypeId::of::<Person>());
    }

    #[test]
    fn test_descriptors_of_same_type_are_equal() {
        assert_eq!(EntityType::<Person>::of(), EntityType::<Person>::default());
    }

    #[test]
    fn test_erased_descriptors_keep_identity() {
        let person = EntityType::<Person>::of().erased();
        let account = EntityType::<Account>::of().erased();

        assert_ne!(person, account);
        assert!(person.is::<Person>());
        assert!(!person.is::<Account>());
        assert_eq!(account.to_string(), format!("{} [account]", account.name()));
    }

    #[test]
    fn test_erased_descriptor_serializes_without_type_id() {
        let json = serde_json::to_value(EntityType::<Person>::of().erased()).unwrap();

        assert_eq!(json["table"], "person");
        assert!(json.get("type_id").is_none());
    }
}
