//! # Recording Operations
//!
//! In-memory [`AsyncCassandraOperations`] that records every call instead of
//! talking to a cluster. Meant for asserting what a caller delegated:
//!
//! ```rust
//! use cassandra_operations::{
//!     Argument, Entity, EntityType, Invocation, Operation, RecordingOperations,
//!     TypedOperationsExt,
//! };
//!
//! struct Person;
//!
//! impl Entity for Person {
//!     const TABLE: &'static str = "person";
//! }
//!
//! let ops = RecordingOperations::new();
//! tokio_test::block_on(ops.typed().select::<Person>("SELECT * FROM person")).unwrap();
//!
//! assert_eq!(
//!     ops.invocations(),
//!     vec![Invocation::new(
//!         Operation::Select,
//!         vec![Argument::Cql("SELECT * FROM person".into())],
//!         EntityType::<Person>::of(),
//!     )]
//! );
//! ```
//!
//! Canned rows registered with [`RecordingOperations::with_rows`] are what
//! the select, slice, count and exists operations answer with, and what
//! row consumers receive.

use async_trait::async_trait;
use serde::Serialize;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{OperationsError, Result};
use crate::operations::AsyncCassandraOperations;
use cassandra_query::{
    Entity, EntityId, EntityType, ErasedEntityType, Query, Slice, Statement, Update,
};

// =============================================================================
// INVOCATION LOG
// =============================================================================

/// Which [`AsyncCassandraOperations`] method was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Select,
    SelectWith,
    SelectOne,
    SelectStatement,
    SelectStatementWith,
    SelectOneStatement,
    SliceStatement,
    SelectQuery,
    SelectOneQuery,
    SliceQuery,
    Update,
    Delete,
    Count,
    CountQuery,
    Exists,
    ExistsQuery,
    SelectOneById,
    DeleteById,
    Truncate,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::SelectWith => "select_with",
            Self::SelectOne => "select_one",
            Self::SelectStatement => "select_statement",
            Self::SelectStatementWith => "select_statement_with",
            Self::SelectOneStatement => "select_one_statement",
            Self::SliceStatement => "slice_statement",
            Self::SelectQuery => "select_query",
            Self::SelectOneQuery => "select_one_query",
            Self::SliceQuery => "slice_query",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Count => "count",
            Self::CountQuery => "count_query",
            Self::Exists => "exists",
            Self::ExistsQuery => "exists_query",
            Self::SelectOneById => "select_one_by_id",
            Self::DeleteById => "delete_by_id",
            Self::Truncate => "truncate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured request argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Argument {
    Cql(String),
    Statement(Statement),
    Query(Query),
    Update(Update),
    Id(EntityId),
    /// Row consumer, identified by its closure type.
    Consumer(&'static str),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cql(cql) => write!(f, "{cql:?}"),
            Self::Statement(statement) => write!(f, "Statement({statement})"),
            Self::Query(query) if query.is_empty() => f.write_str("Query::empty()"),
            Self::Query(query) => write!(f, "Query({query})"),
            Self::Update(update) if update.is_empty() => f.write_str("Update::empty()"),
            Self::Update(update) => write!(f, "Update({update})"),
            Self::Id(id) => write!(f, "Id({id})"),
            Self::Consumer(name) => write!(f, "Consumer({name})"),
        }
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub operation: Operation,
    pub arguments: Vec<Argument>,
    pub entity_type: ErasedEntityType,
}

impl Invocation {
    pub fn new<T: Entity>(
        operation: Operation,
        arguments: Vec<Argument>,
        entity_type: EntityType<T>,
    ) -> Self {
        Self {
            operation,
            arguments,
            entity_type: entity_type.erased(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for argument in &self.arguments {
            write!(f, "{argument}, ")?;
        }
        write!(f, "{})", self.entity_type)
    }
}

// =============================================================================
// RECORDING OPERATIONS
// =============================================================================

type RowSource<T> = Box<dyn Fn() -> Vec<T> + Send + Sync>;

#[derive(Default)]
struct State {
    invocations: Vec<Invocation>,
    failure: Option<OperationsError>,
    rows: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

/// Recording test double for [`AsyncCassandraOperations`].
#[derive(Default)]
pub struct RecordingOperations {
    state: Mutex<State>,
}

impl RecordingOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `T` with clones of `rows`.
    #[must_use]
    pub fn with_rows<T: Entity + Clone>(self, rows: Vec<T>) -> Self {
        let source: RowSource<T> = Box::new(move || rows.clone());
        self.lock().rows.insert(TypeId::of::<T>(), Box::new(source));
        self
    }

    /// Fail the next call with `error`. The call is still recorded.
    pub fn fail_next(&self, error: OperationsError) {
        self.lock().failure = Some(error);
    }

    /// Snapshot of the invocation log.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().invocations.clone()
    }

    /// Drain the invocation log.
    #[must_use]
    pub fn take_invocations(&self) -> Vec<Invocation> {
        std::mem::take(&mut self.lock().invocations)
    }

    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.lock().invocations.len()
    }

    #[must_use]
    pub fn last_invocation(&self) -> Option<Invocation> {
        self.lock().invocations.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record<T: Entity>(
        &self,
        operation: Operation,
        arguments: Vec<Argument>,
        entity_type: EntityType<T>,
    ) -> Result<Vec<T>> {
        let mut state = self.lock();
        state
            .invocations
            .push(Invocation::new(operation, arguments, entity_type));

        tracing::debug!(
            operation = %operation,
            entity = entity_type.name(),
            "Recorded invocation"
        );

        if let Some(error) = state.failure.take() {
            return Err(error);
        }

        Ok(state
            .rows
            .get(&TypeId::of::<T>())
            .and_then(|source| (**source).downcast_ref::<RowSource<T>>())
            .map(|source| source())
            .unwrap_or_default())
    }
}

impl fmt::Debug for RecordingOperations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("RecordingOperations")
            .field("invocations", &state.invocations.len())
            .field("pending_failure", &state.failure.is_some())
            .finish_non_exhaustive()
    }
}

fn count_of(rows: &[impl Sized]) -> i64 {
    i64::try_from(rows.len()).unwrap_or(i64::MAX)
}

#[async_trait]
impl AsyncCassandraOperations for RecordingOperations {
    async fn select<T: Entity>(&self, cql: &str, entity_type: EntityType<T>) -> Result<Vec<T>> {
        self.record(Operation::Select, vec![Argument::Cql(cql.to_string())], entity_type)
    }

    async fn select_with<T, F>(
        &self,
        cql: &str,
        mut consumer: F,
        entity_type: EntityType<T>,
    ) -> Result<()>
    where
        T: Entity,
        F: FnMut(T) + Send,
    {
        let arguments = vec![
            Argument::Cql(cql.to_string()),
            Argument::Consumer(type_name::<F>()),
        ];
        for row in self.record(Operation::SelectWith, arguments, entity_type)? {
            consumer(row);
        }
        Ok(())
    }

    async fn select_one<T: Entity>(
        &self,
        cql: &str,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>> {
        self.record(Operation::SelectOne, vec![Argument::Cql(cql.to_string())], entity_type)
            .map(|rows| rows.into_iter().next())
    }

    async fn select_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Vec<T>> {
        self.record(
            Operation::SelectStatement,
            vec![Argument::Statement(statement)],
            entity_type,
        )
    }

    async fn select_statement_with<T, F>(
        &self,
        statement: Statement,
        mut consumer: F,
        entity_type: EntityType<T>,
    ) -> Result<()>
    where
        T: Entity,
        F: FnMut(T) + Send,
    {
        let arguments = vec![
            Argument::Statement(statement),
            Argument::Consumer(type_name::<F>()),
        ];
        for row in self.record(Operation::SelectStatementWith, arguments, entity_type)? {
            consumer(row);
        }
        Ok(())
    }

    async fn select_one_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>> {
        self.record(
            Operation::SelectOneStatement,
            vec![Argument::Statement(statement)],
            entity_type,
        )
        .map(|rows| rows.into_iter().next())
    }

    async fn slice_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Slice<T>> {
        self.record(
            Operation::SliceStatement,
            vec![Argument::Statement(statement)],
            entity_type,
        )
        .map(|rows| Slice::new(rows, None))
    }

    async fn select_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Vec<T>> {
        self.record(Operation::SelectQuery, vec![Argument::Query(query)], entity_type)
    }

    async fn select_one_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>> {
        self.record(Operation::SelectOneQuery, vec![Argument::Query(query)], entity_type)
            .map(|rows| rows.into_iter().next())
    }

    async fn slice_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Slice<T>> {
        self.record(Operation::SliceQuery, vec![Argument::Query(query)], entity_type)
            .map(|rows| Slice::new(rows, None))
    }

    async fn update<T: Entity>(
        &self,
        query: Query,
        update: Update,
        entity_type: EntityType<T>,
    ) -> Result<bool> {
        self.record(
            Operation::Update,
            vec![Argument::Query(query), Argument::Update(update)],
            entity_type,
        )
        .map(|_| true)
    }

    async fn delete<T: Entity>(&self, query: Query, entity_type: EntityType<T>) -> Result<bool> {
        self.record(Operation::Delete, vec![Argument::Query(query)], entity_type)
            .map(|_| true)
    }

    async fn count<T: Entity>(&self, entity_type: EntityType<T>) -> Result<i64> {
        self.record(Operation::Count, Vec::new(), entity_type)
            .map(|rows| count_of(&rows))
    }

    async fn count_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<i64> {
        self.record(Operation::CountQuery, vec![Argument::Query(query)], entity_type)
            .map(|rows| count_of(&rows))
    }

    async fn exists<T: Entity>(&self, id: EntityId, entity_type: EntityType<T>) -> Result<bool> {
        self.record(Operation::Exists, vec![Argument::Id(id)], entity_type)
            .map(|rows| !rows.is_empty())
    }

    async fn exists_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<bool> {
        self.record(Operation::ExistsQuery, vec![Argument::Query(query)], entity_type)
            .map(|rows| !rows.is_empty())
    }

    async fn select_one_by_id<T: Entity>(
        &self,
        id: EntityId,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>> {
        self.record(Operation::SelectOneById, vec![Argument::Id(id)], entity_type)
            .map(|rows| rows.into_iter().next())
    }

    async fn delete_by_id<T: Entity>(
        &self,
        id: EntityId,
        entity_type: EntityType<T>,
    ) -> Result<bool> {
        self.record(Operation::DeleteById, vec![Argument::Id(id)], entity_type)
            .map(|_| true)
    }

    async fn truncate<T: Entity>(&self, entity_type: EntityType<T>) -> Result<()> {
        self.record(Operation::Truncate, Vec::new(), entity_type)
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cassandra_query::Columns;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
    }

    impl Entity for Person {
        const TABLE: &'static str = "person";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Account;

    impl Entity for Account {
        const TABLE: &'static str = "account";
    }

    fn jane() -> Person {
        Person {
            name: "Jane".to_string(),
        }
    }

    #[tokio::test]
    async fn test_canned_rows_are_per_entity_type() {
        let ops = RecordingOperations::new().with_rows(vec![jane()]);

        let people = ops
            .select("SELECT * FROM person", EntityType::<Person>::of())
            .await
            .unwrap();
        let accounts = ops
            .select("SELECT * FROM account", EntityType::<Account>::of())
            .await
            .unwrap();

        assert_eq!(people, vec![jane()]);
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_consumed_by_one_call() {
        let ops = RecordingOperations::new();
        ops.fail_next(OperationsError::Connection("refused".into()));

        let first = ops.count(EntityType::<Person>::of()).await;
        let second = ops.count(EntityType::<Person>::of()).await;

        assert!(matches!(first, Err(OperationsError::Connection(_))));
        assert_eq!(second.unwrap(), 0);
        assert_eq!(ops.invocation_count(), 2);
    }

    #[tokio::test]
    async fn test_take_invocations_drains_log() {
        let ops = RecordingOperations::new();
        ops.truncate(EntityType::<Person>::of()).await.unwrap();

        assert_eq!(ops.take_invocations().len(), 1);
        assert_eq!(ops.invocation_count(), 0);
        assert!(ops.last_invocation().is_none());
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::new(
            Operation::Update,
            vec![Argument::Query(Query::empty()), Argument::Update(Update::empty())],
            EntityType::<Person>::of(),
        );

        let name = EntityType::<Person>::of().name();
        assert_eq!(
            invocation.to_string(),
            format!("update(Query::empty(), Update::empty(), {name} [person])")
        );
    }

    #[test]
    fn test_projection_only_query_is_not_shown_as_empty() {
        let query = Query::empty()
            .columns(Columns::include(["id"]))
            .with_page_size(5)
            .unwrap();

        assert_eq!(
            Argument::Query(query).to_string(),
            "Query([columns: id] [page_size: 5])"
        );
        assert_eq!(Argument::Query(Query::empty()).to_string(), "Query::empty()");
    }

    #[test]
    fn test_invocation_serializes_to_json() {
        let invocation = Invocation::new(
            Operation::Exists,
            vec![Argument::Id(EntityId::from("id-123"))],
            EntityType::<Person>::of(),
        );

        let json = serde_json::to_value(&invocation).unwrap();

        assert_eq!(json["operation"], "exists");
        assert_eq!(json["arguments"][0]["kind"], "id");
        assert_eq!(json["arguments"][0]["value"]["value"], "id-123");
        assert_eq!(json["entity_type"]["table"], "person");
    }
}
