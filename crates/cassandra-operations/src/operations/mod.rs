//! # Operations Module
//!
//! The asynchronous data access interface and the typed facade in front of it.

pub mod request;
pub mod traits;
pub mod typed;

pub use request::{ExistsRequest, RowCallbackRequest, SelectRequest, SliceRequest};
pub use traits::{AsyncCassandraOperations, OperationFuture};
pub use typed::{TypedOperations, TypedOperationsExt};
