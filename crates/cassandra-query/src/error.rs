//! Query model error types

use thiserror::Error;

/// Errors raised while building request values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("IN criteria on column '{column}' requires at least one value")]
    EmptyInList { column: String },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("Counter delta for column '{column}' is out of range")]
    DeltaOutOfRange { column: String },
}

pub type Result<T> = std::result::Result<T, QueryError>;
