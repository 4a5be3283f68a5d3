//! # Typed Operations
//!
//! Generic front for [`AsyncCassandraOperations`]: the entity type is given
//! as a type parameter and the [`EntityType`] descriptor is filled in at
//! compile time.
//!
//! ```rust,ignore
//! use cassandra_operations::TypedOperationsExt;
//!
//! let people = operations.typed().select::<Person>("SELECT * FROM person").await?;
//! let jane = operations.typed().select_one_by_id::<Person>("jane").await?;
//! operations.typed().truncate::<Person>().await?;
//! ```
//!
//! Each call makes exactly one call on the wrapped operations and returns
//! its future as-is. Nothing is awaited, retried, cached or mapped here.

use std::fmt;

use super::request::{ExistsRequest, RowCallbackRequest, SelectRequest, SliceRequest};
use super::traits::{AsyncCassandraOperations, OperationFuture};
use cassandra_query::{Entity, EntityId, EntityType, Query, Slice, Update};

/// Entry point for the typed facade.
pub trait TypedOperationsExt: AsyncCassandraOperations + Sized {
    /// Borrow `self` as a [`TypedOperations`].
    fn typed(&self) -> TypedOperations<'_, Self> {
        TypedOperations::new(self)
    }
}

impl<O: AsyncCassandraOperations> TypedOperationsExt for O {}

/// Typed facade over `O`. Holds only a shared reference and is `Copy`.
pub struct TypedOperations<'a, O> {
    operations: &'a O,
}

impl<O> Clone for TypedOperations<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for TypedOperations<'_, O> {}

impl<O> fmt::Debug for TypedOperations<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedOperations")
            .field("operations", &std::any::type_name::<O>())
            .finish()
    }
}

/// Resolve the descriptor for `T` and trace the forwarded call.
fn descriptor<T: Entity>(operation: &'static str) -> EntityType<T> {
    let entity_type = EntityType::<T>::of();
    tracing::trace!(
        operation,
        entity = entity_type.name(),
        table = entity_type.table(),
        "Forwarding typed operation"
    );
    entity_type
}

impl<'a, O: AsyncCassandraOperations> TypedOperations<'a, O> {
    pub const fn new(operations: &'a O) -> Self {
        Self { operations }
    }

    /// The wrapped operations.
    pub const fn operations(&self) -> &'a O {
        self.operations
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Select all rows matching a CQL string, [`Statement`] or [`Query`].
    ///
    /// [`Statement`]: cassandra_query::Statement
    pub fn select<T: Entity>(
        &self,
        request: impl Into<SelectRequest<'a>>,
    ) -> OperationFuture<'a, Vec<T>> {
        let operations = self.operations;
        let entity_type = descriptor::<T>("select");
        match request.into() {
            SelectRequest::Cql(cql) => operations.select(cql, entity_type),
            SelectRequest::Statement(statement) => {
                operations.select_statement(statement, entity_type)
            }
            SelectRequest::Query(query) => operations.select_query(query, entity_type),
        }
    }

    /// Select rows matching a CQL string or statement, handing each one to
    /// `consumer` as it is mapped.
    pub fn select_with<T: Entity>(
        &self,
        request: impl Into<RowCallbackRequest<'a>>,
        consumer: impl FnMut(T) + Send + 'a,
    ) -> OperationFuture<'a, ()> {
        let operations = self.operations;
        let entity_type = descriptor::<T>("select_with");
        match request.into() {
            RowCallbackRequest::Cql(cql) => operations.select_with(cql, consumer, entity_type),
            RowCallbackRequest::Statement(statement) => {
                operations.select_statement_with(statement, consumer, entity_type)
            }
        }
    }

    /// Select the first matching row.
    pub fn select_one<T: Entity>(
        &self,
        request: impl Into<SelectRequest<'a>>,
    ) -> OperationFuture<'a, Option<T>> {
        let operations = self.operations;
        let entity_type = descriptor::<T>("select_one");
        match request.into() {
            SelectRequest::Cql(cql) => operations.select_one(cql, entity_type),
            SelectRequest::Statement(statement) => {
                operations.select_one_statement(statement, entity_type)
            }
            SelectRequest::Query(query) => operations.select_one_query(query, entity_type),
        }
    }

    /// Select one page of rows.
    pub fn slice<T: Entity>(&self, request: impl Into<SliceRequest>) -> OperationFuture<'a, Slice<T>> {
        let operations = self.operations;
        let entity_type = descriptor::<T>("slice");
        match request.into() {
            SliceRequest::Statement(statement) => operations.slice_statement(statement, entity_type),
            SliceRequest::Query(query) => operations.slice_query(query, entity_type),
        }
    }

    pub fn select_one_by_id<T: Entity>(
        &self,
        id: impl Into<EntityId>,
    ) -> OperationFuture<'a, Option<T>> {
        let entity_type = descriptor::<T>("select_one_by_id");
        self.operations.select_one_by_id(id.into(), entity_type)
    }

    // =========================================================================
    // MODIFICATION
    // =========================================================================

    pub fn update<T: Entity>(&self, query: Query, update: Update) -> OperationFuture<'a, bool> {
        let entity_type = descriptor::<T>("update");
        self.operations.update(query, update, entity_type)
    }

    pub fn delete<T: Entity>(&self, query: Query) -> OperationFuture<'a, bool> {
        let entity_type = descriptor::<T>("delete");
        self.operations.delete(query, entity_type)
    }

    pub fn delete_by_id<T: Entity>(&self, id: impl Into<EntityId>) -> OperationFuture<'a, bool> {
        let entity_type = descriptor::<T>("delete_by_id");
        self.operations.delete_by_id(id.into(), entity_type)
    }

    pub fn truncate<T: Entity>(&self) -> OperationFuture<'a, ()> {
        let entity_type = descriptor::<T>("truncate");
        self.operations.truncate(entity_type)
    }

    // =========================================================================
    // COUNTING & EXISTENCE
    // =========================================================================

    /// Count every row of `T`'s table.
    pub fn count<T: Entity>(&self) -> OperationFuture<'a, i64> {
        let entity_type = descriptor::<T>("count");
        self.operations.count(entity_type)
    }

    /// Count rows matching `query`.
    pub fn count_matching<T: Entity>(&self, query: Query) -> OperationFuture<'a, i64> {
        let entity_type = descriptor::<T>("count_matching");
        self.operations.count_query(query, entity_type)
    }

    /// Check for a row by identifier or by query.
    pub fn exists<T: Entity>(&self, request: impl Into<ExistsRequest>) -> OperationFuture<'a, bool> {
        let operations = self.operations;
        let entity_type = descriptor::<T>("exists");
        match request.into() {
            ExistsRequest::Id(id) => operations.exists(id, entity_type),
            ExistsRequest::Query(query) => operations.exists_query(query, entity_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationsError;
    use crate::recording::{Argument, Invocation, Operation, RecordingOperations};
    use cassandra_query::{Criteria, Statement};
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: String,
        first_name: String,
        last_name: String,
        age: i32,
    }

    impl Entity for Person {
        const TABLE: &'static str = "person";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        id: Uuid,
    }

    impl Entity for Account {
        const TABLE: &'static str = "account";
    }

    const CQL: &str = "SELECT * FROM person";

    fn person() -> Person {
        Person {
            id: Uuid::new_v4().to_string(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            age: (18..90).fake(),
        }
    }

    fn person_type() -> EntityType<Person> {
        EntityType::of()
    }

    /// The one call the facade delegated.
    fn single_invocation(ops: &RecordingOperations) -> Invocation {
        let mut invocations = ops.take_invocations();
        assert_eq!(
            invocations.len(),
            1,
            "expected exactly one delegated call, got {invocations:?}"
        );
        invocations.remove(0)
    }

    fn statement() -> Statement {
        Statement::new("SELECT * FROM person WHERE last_name = ?").bind("Doe")
    }

    // -------------------------------------------------------------------------
    // Static CQL
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_select_cql_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().select::<Person>(CQL).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::Select,
                vec![Argument::Cql(CQL.to_string())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_cql_with_consumer_passes_same_consumer() {
        let jane = person();
        let ops = RecordingOperations::new().with_rows(vec![jane.clone()]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let consumer = move |p: Person| sink.lock().unwrap().push(p.id);
        let consumer_type = std::any::type_name_of_val(&consumer);

        ops.typed().select_with::<Person>(CQL, consumer).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectWith,
                vec![
                    Argument::Cql(CQL.to_string()),
                    Argument::Consumer(consumer_type)
                ],
                person_type()
            )
        );
        assert_eq!(*seen.lock().unwrap(), vec![jane.id]);
    }

    #[tokio::test]
    async fn test_select_one_cql_forwards_with_descriptor() {
        let jane = person();
        let ops = RecordingOperations::new().with_rows(vec![jane.clone(), person()]);

        let found = ops.typed().select_one::<Person>(CQL).await.unwrap();

        assert_eq!(found, Some(jane));
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectOne,
                vec![Argument::Cql(CQL.to_string())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_owned_string_cql() {
        let ops = RecordingOperations::new();
        let cql = format!("SELECT * FROM {}", Person::TABLE);

        ops.typed().select::<Person>(&cql).await.unwrap();

        assert_eq!(single_invocation(&ops).arguments, vec![Argument::Cql(cql)]);
    }

    // -------------------------------------------------------------------------
    // Statements
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_select_statement_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().select::<Person>(statement()).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectStatement,
                vec![Argument::Statement(statement())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_statement_with_consumer_passes_same_consumer() {
        let rows = vec![person(), person()];
        let ops = RecordingOperations::new().with_rows(rows.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let consumer = move |p: Person| sink.lock().unwrap().push(p);
        let consumer_type = std::any::type_name_of_val(&consumer);

        ops.typed()
            .select_with::<Person>(statement(), consumer)
            .await
            .unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectStatementWith,
                vec![
                    Argument::Statement(statement()),
                    Argument::Consumer(consumer_type)
                ],
                person_type()
            )
        );
        assert_eq!(*seen.lock().unwrap(), rows);
    }

    #[tokio::test]
    async fn test_slice_statement_forwards_with_descriptor() {
        let ops = RecordingOperations::new().with_rows(vec![person()]);
        let paged = statement().with_page_size(25).unwrap();

        let slice = ops.typed().slice::<Person>(paged.clone()).await.unwrap();

        assert_eq!(slice.len(), 1);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SliceStatement,
                vec![Argument::Statement(paged)],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_one_statement_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        let found = ops.typed().select_one::<Person>(statement()).await.unwrap();

        assert_eq!(found, None);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectOneStatement,
                vec![Argument::Statement(statement())],
                person_type()
            )
        );
    }

    // -------------------------------------------------------------------------
    // Structured queries
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_select_query_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().select::<Person>(Query::empty()).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectQuery,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_slice_query_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().slice::<Person>(Query::empty()).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SliceQuery,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_one_query_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().select_one::<Person>(Query::empty()).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectOneQuery,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_update_forwards_query_update_and_descriptor_in_order() {
        let ops = RecordingOperations::new();

        let applied = ops
            .typed()
            .update::<Person>(Query::empty(), Update::empty())
            .await
            .unwrap();

        assert!(applied);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::Update,
                vec![
                    Argument::Query(Query::empty()),
                    Argument::Update(Update::empty())
                ],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_update_passes_non_empty_payload_unchanged() {
        let ops = RecordingOperations::new();
        let query = Query::matching(Criteria::column("id").is("id-123"));
        let update = Update::empty().set("last_name", "Doe").increment("visits", 1);

        ops.typed()
            .update::<Person>(query.clone(), update.clone())
            .await
            .unwrap();

        assert_eq!(
            single_invocation(&ops).arguments,
            vec![Argument::Query(query), Argument::Update(update)]
        );
    }

    #[tokio::test]
    async fn test_delete_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().delete::<Person>(Query::empty()).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::Delete,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    // -------------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_count_without_query_forwards_only_descriptor() {
        let ops = RecordingOperations::new().with_rows(vec![person(), person()]);

        let count = ops.typed().count::<Person>().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(Operation::Count, Vec::new(), person_type())
        );
    }

    #[tokio::test]
    async fn test_count_with_query_is_distinct_overload() {
        let ops = RecordingOperations::new();

        ops.typed()
            .count_matching::<Person>(Query::empty())
            .await
            .unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::CountQuery,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_exists_by_id_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        let exists = ops.typed().exists::<Person>("id-123").await.unwrap();

        assert!(!exists);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::Exists,
                vec![Argument::Id(EntityId::from("id-123"))],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_exists_by_query_forwards_with_descriptor() {
        let ops = RecordingOperations::new().with_rows(vec![person()]);

        let exists = ops.typed().exists::<Person>(Query::empty()).await.unwrap();

        assert!(exists);
        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::ExistsQuery,
                vec![Argument::Query(Query::empty())],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_select_one_by_id_forwards_with_descriptor() {
        let ops = RecordingOperations::new();

        ops.typed().select_one_by_id::<Person>("id").await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::SelectOneById,
                vec![Argument::Id(EntityId::from("id"))],
                person_type()
            )
        );
    }

    #[tokio::test]
    async fn test_delete_by_id_forwards_with_descriptor() {
        let ops = RecordingOperations::new();
        let id = Uuid::new_v4();

        ops.typed().delete_by_id::<Account>(id).await.unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(
                Operation::DeleteById,
                vec![Argument::Id(EntityId::Uuid(id))],
                EntityType::<Account>::of()
            )
        );
    }

    #[test]
    fn test_truncate_forwards_only_descriptor() {
        let ops = RecordingOperations::new();

        tokio_test::block_on(ops.typed().truncate::<Person>()).unwrap();

        assert_eq!(
            single_invocation(&ops),
            Invocation::new(Operation::Truncate, Vec::new(), person_type())
        );
    }

    // -------------------------------------------------------------------------
    // Handles, errors, concurrency
    // -------------------------------------------------------------------------

    #[test]
    fn test_returned_future_is_not_driven_by_facade() {
        let ops = RecordingOperations::new();

        let pending = ops.typed().count::<Person>();
        assert_eq!(ops.invocation_count(), 0);

        tokio_test::block_on(pending).unwrap();
        assert_eq!(ops.invocation_count(), 1);
    }

    #[tokio::test]
    async fn test_underlying_error_is_returned_unchanged() {
        let ops = RecordingOperations::new();
        ops.fail_next(OperationsError::Timeout { timeout_ms: 250 });

        let err = ops
            .typed()
            .select_one_by_id::<Person>("id-123")
            .await
            .unwrap_err();

        assert!(matches!(err, OperationsError::Timeout { timeout_ms: 250 }));
        assert_eq!(ops.invocation_count(), 1);
    }

    #[tokio::test]
    async fn test_descriptor_follows_type_parameter() {
        let ops = RecordingOperations::new();
        let typed = ops.typed();

        typed.count::<Person>().await.unwrap();
        typed.count::<Account>().await.unwrap();

        let tables: Vec<_> = ops
            .take_invocations()
            .into_iter()
            .map(|i| i.entity_type.table())
            .collect();
        assert_eq!(tables, vec!["person", "account"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_each_delegate_once() {
        let ops = Arc::new(RecordingOperations::new());

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let ops = Arc::clone(&ops);
                tokio::spawn(async move {
                    ops.typed()
                        .exists::<Person>(format!("id-{i}"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        let invocations = ops.take_invocations();
        assert_eq!(invocations.len(), 32);
        assert!(invocations
            .iter()
            .all(|i| i.operation == Operation::Exists && i.entity_type.is::<Person>()));
    }
}
