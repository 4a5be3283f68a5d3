//! # Cassandra Operations
//!
//! Typed access to asynchronous Cassandra data operations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! │        ops.typed().select::<Person>("SELECT ...")            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TypedOperations                          │
//! │       (resolves EntityType<T>, picks the overload)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 AsyncCassandraOperations                     │
//! │   select(cql, EntityType<Person>) -> OperationFuture<..>     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The facade adds nothing but the descriptor: one call in, one call out,
//! and the returned future is the one the wrapped operations produced.
//!
//! ## Usage
//!
//! ```rust
//! use cassandra_operations::{Entity, Query, RecordingOperations, TypedOperationsExt};
//!
//! struct Person;
//!
//! impl Entity for Person {
//!     const TABLE: &'static str = "person";
//! }
//!
//! let ops = RecordingOperations::new();
//! let count = tokio_test::block_on(ops.typed().count_matching::<Person>(Query::empty()));
//! assert_eq!(count.unwrap(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod operations;
pub mod recording;

// Re-export commonly used types
pub use cassandra_query::{
    Criteria, CqlValue, Entity, EntityId, EntityType, ErasedEntityType, Query, Slice, Statement,
    Update,
};
pub use error::{OperationsError, Result};
pub use operations::{
    AsyncCassandraOperations, ExistsRequest, OperationFuture, RowCallbackRequest, SelectRequest,
    SliceRequest, TypedOperations, TypedOperationsExt,
};
pub use recording::{Argument, Invocation, Operation, RecordingOperations};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
