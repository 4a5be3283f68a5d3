//! Request forms accepted by the typed facade.
//!
//! Each enum lists the forms one facade operation accepts, and picks which
//! [`AsyncCassandraOperations`](super::AsyncCassandraOperations) method the
//! call is routed to. Conversions only wrap; the payload is never altered.

use cassandra_query::{EntityId, Query, Statement};
use uuid::Uuid;

/// Forms accepted by `select` and `select_one`.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectRequest<'a> {
    Cql(&'a str),
    Statement(Statement),
    Query(Query),
}

impl<'a> From<&'a str> for SelectRequest<'a> {
    fn from(cql: &'a str) -> Self {
        Self::Cql(cql)
    }
}

impl<'a> From<&'a String> for SelectRequest<'a> {
    fn from(cql: &'a String) -> Self {
        Self::Cql(cql)
    }
}

impl From<Statement> for SelectRequest<'_> {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<Query> for SelectRequest<'_> {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

/// Forms accepted by `select_with`, which streams rows to a consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum RowCallbackRequest<'a> {
    Cql(&'a str),
    Statement(Statement),
}

impl<'a> From<&'a str> for RowCallbackRequest<'a> {
    fn from(cql: &'a str) -> Self {
        Self::Cql(cql)
    }
}

impl<'a> From<&'a String> for RowCallbackRequest<'a> {
    fn from(cql: &'a String) -> Self {
        Self::Cql(cql)
    }
}

impl From<Statement> for RowCallbackRequest<'_> {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

/// Forms accepted by `slice`.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceRequest {
    Statement(Statement),
    Query(Query),
}

impl From<Statement> for SliceRequest {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<Query> for SliceRequest {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

/// Forms accepted by `exists`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExistsRequest {
    Id(EntityId),
    Query(Query),
}

impl From<EntityId> for ExistsRequest {
    fn from(id: EntityId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ExistsRequest {
    fn from(id: &str) -> Self {
        Self::Id(id.into())
    }
}

impl From<String> for ExistsRequest {
    fn from(id: String) -> Self {
        Self::Id(id.into())
    }
}

impl From<Uuid> for ExistsRequest {
    fn from(id: Uuid) -> Self {
        Self::Id(id.into())
    }
}

impl From<i64> for ExistsRequest {
    fn from(id: i64) -> Self {
        Self::Id(id.into())
    }
}

impl From<Query> for ExistsRequest {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}
