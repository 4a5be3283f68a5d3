//! # Cassandra Query Model
//!
//! Entity descriptors and the request value types handed to asynchronous
//! Cassandra data access interfaces:
//!
//! - [`EntityType`]: compile-time resolved type descriptor for an [`Entity`]
//! - [`Statement`]: CQL text with positional bind values
//! - [`Query`] / [`Criteria`]: structured selection (`WHERE`, projection,
//!   ordering, limit, paging)
//! - [`Update`]: column assignments
//! - [`EntityId`]: primary key value
//! - [`Slice`]: one page of results
//!
//! These are plain values. Nothing in this crate talks to a cluster.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod entity;
pub mod error;
pub mod id;
pub mod query;
pub mod slice;
pub mod statement;
pub mod update;
pub mod value;

pub use entity::{Entity, EntityType, ErasedEntityType};
pub use error::{QueryError, Result};
pub use id::EntityId;
pub use query::{Columns, Criteria, CriteriaBuilder, Direction, Operator, Order, Query, Sort};
pub use slice::Slice;
pub use statement::{PagingState, Statement};
pub use update::{Assignment, AssignmentOp, Update};
pub use value::CqlValue;
