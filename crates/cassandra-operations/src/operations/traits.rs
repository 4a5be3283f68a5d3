//! # Async Cassandra Operations
//!
//! The data access interface the typed facade forwards to. Every operation
//! takes the target [`EntityType`] as its last argument; implementations map
//! rows into `T` and return the work as a boxed future.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use cassandra_query::{Entity, EntityId, EntityType, Query, Slice, Statement, Update};

/// Handle for an in-flight operation, as returned by every
/// [`AsyncCassandraOperations`] method.
pub type OperationFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Asynchronous Cassandra data access with explicit entity descriptors.
#[async_trait]
pub trait AsyncCassandraOperations: Send + Sync {
    // =========================================================================
    // STATIC CQL
    // =========================================================================

    /// Execute `cql` and map every row to `T`.
    async fn select<T: Entity>(&self, cql: &str, entity_type: EntityType<T>) -> Result<Vec<T>>;

    /// Execute `cql` and hand each mapped row to `consumer`.
    async fn select_with<T, F>(
        &self,
        cql: &str,
        consumer: F,
        entity_type: EntityType<T>,
    ) -> Result<()>
    where
        T: Entity,
        F: FnMut(T) + Send;

    /// Execute `cql` and map the first row, if any.
    async fn select_one<T: Entity>(
        &self,
        cql: &str,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>>;

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    async fn select_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Vec<T>>;

    async fn select_statement_with<T, F>(
        &self,
        statement: Statement,
        consumer: F,
        entity_type: EntityType<T>,
    ) -> Result<()>
    where
        T: Entity,
        F: FnMut(T) + Send;

    async fn select_one_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>>;

    /// Fetch one page, honouring the statement's page size and paging state.
    async fn slice_statement<T: Entity>(
        &self,
        statement: Statement,
        entity_type: EntityType<T>,
    ) -> Result<Slice<T>>;

    // =========================================================================
    // STRUCTURED QUERIES
    // =========================================================================

    async fn select_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Vec<T>>;

    async fn select_one_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>>;

    async fn slice_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<Slice<T>>;

    /// Apply `update` to rows matching `query`. Returns whether it was applied.
    async fn update<T: Entity>(
        &self,
        query: Query,
        update: Update,
        entity_type: EntityType<T>,
    ) -> Result<bool>;

    /// Delete rows matching `query`. Returns whether it was applied.
    async fn delete<T: Entity>(&self, query: Query, entity_type: EntityType<T>) -> Result<bool>;

    // =========================================================================
    // ENTITIES
    // =========================================================================

    /// Count all rows of `T`'s table.
    async fn count<T: Entity>(&self, entity_type: EntityType<T>) -> Result<i64>;

    async fn count_query<T: Entity>(&self, query: Query, entity_type: EntityType<T>)
        -> Result<i64>;

    async fn exists<T: Entity>(&self, id: EntityId, entity_type: EntityType<T>) -> Result<bool>;

    async fn exists_query<T: Entity>(
        &self,
        query: Query,
        entity_type: EntityType<T>,
    ) -> Result<bool>;

    async fn select_one_by_id<T: Entity>(
        &self,
        id: EntityId,
        entity_type: EntityType<T>,
    ) -> Result<Option<T>>;

    async fn delete_by_id<T: Entity>(
        &self,
        id: EntityId,
        entity_type: EntityType<T>,
    ) -> Result<bool>;

    /// Remove every row of `T`'s table.
    async fn truncate<T: Entity>(&self, entity_type: EntityType<T>) -> Result<()>;
}
