//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

use crate::config::{EntityKind, LogFormat, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "cassandra-explain")]
#[command(about = "Show which Cassandra operation a typed call delegates to")]
pub struct Cli {
    /// Entity type parameter of the call
    #[arg(short, long, value_enum)]
    pub entity: Option<EntityKind>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log format on stderr
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Typed facade operation to resolve.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// select::<T>(cql | statement | query)
    Select(RequestArgs),

    /// select::<T>(cql | statement, consumer)
    SelectWith(RequestArgs),

    /// select_one::<T>(cql | statement | query)
    SelectOne(RequestArgs),

    /// slice::<T>(statement | query)
    Slice(RequestArgs),

    /// update::<T>(query, update)
    Update {
        #[command(flatten)]
        filter: FilterArgs,

        /// Assignment, repeatable
        #[arg(long = "set", value_name = "COLUMN=VALUE", required = true)]
        assignments: Vec<String>,
    },

    /// delete::<T>(query)
    Delete(FilterArgs),

    /// count::<T>() or count_matching::<T>(query) when filters are given
    Count(FilterArgs),

    /// exists::<T>(id | query)
    Exists {
        /// Primary key value
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// select_one_by_id::<T>(id)
    SelectOneById { id: String },

    /// delete_by_id::<T>(id)
    DeleteById { id: String },

    /// truncate::<T>()
    Truncate,
}

/// Structured query built from `--where` and `--limit`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Equality criteria, repeatable
    #[arg(long = "where", value_name = "COLUMN=VALUE")]
    pub filters: Vec<String>,

    #[arg(long)]
    pub limit: Option<u32>,
}

impl FilterArgs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.limit.is_none()
    }
}

/// One of raw CQL, a statement with binds, or a structured query.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestArgs {
    /// Raw CQL text
    #[arg(long, conflicts_with = "statement")]
    pub cql: Option<String>,

    /// Statement CQL with `?` placeholders
    #[arg(long)]
    pub statement: Option<String>,

    /// Positional bind value, repeatable
    #[arg(long = "bind", requires = "statement")]
    pub binds: Vec<String>,

    /// Statement page size
    #[arg(long, requires = "statement")]
    pub page_size: Option<u32>,

    #[command(flatten)]
    pub filter: FilterArgs,
}
