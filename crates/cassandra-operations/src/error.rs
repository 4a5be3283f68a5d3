//! Data access error types

use cassandra_query::QueryError;
use thiserror::Error;

/// Errors surfaced by asynchronous Cassandra operations.
#[derive(Debug, Error)]
pub enum OperationsError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {message} (cql: {cql})")]
    Query { cql: String, message: String },

    #[error("Mapping error for {entity}: {message}")]
    Mapping { entity: String, message: String },

    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Operation timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<QueryError> for OperationsError {
    fn from(err: QueryError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OperationsError>;
