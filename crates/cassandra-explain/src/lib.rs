//! # Cassandra Explain
//!
//! Command-line tool that issues one typed facade call against
//! [`RecordingOperations`](cassandra_operations::RecordingOperations) and
//! prints the underlying operation it was routed to, with its arguments and
//! entity descriptor.
//!
//! ```text
//! $ cassandra-explain --entity account -o text count --where owner=Jane
//! count_query(Query(WHERE owner = 'Jane'), cassandra_explain::entities::Account [account])
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod entities;
pub mod explain;

pub use cli::{Cli, Command};
pub use config::{Config, ConfigError, EntityKind, LogFormat, OutputFormat};
pub use explain::{ExplainError, explain, explain_for, render};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
