//! Resolve a [`Command`] into the call the typed facade delegates.

use thiserror::Error;
use uuid::Uuid;

use crate::cli::{Command, FilterArgs, RequestArgs};
use crate::config::{EntityKind, OutputFormat};
use crate::entities::{Account, Person};
use cassandra_operations::{
    Invocation, OperationsError, RecordingOperations, TypedOperationsExt,
};
use cassandra_query::{
    CqlValue, Criteria, Entity, EntityId, Query, QueryError, Statement, Update,
};

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("Expected one of --cql, --statement or --where")]
    MissingRequest,

    #[error("Request forms are mutually exclusive: {0}")]
    ConflictingRequest(&'static str),

    #[error("{operation} does not accept a {form} request")]
    UnsupportedForm {
        operation: &'static str,
        form: &'static str,
    },

    #[error("Expected COLUMN=VALUE, got '{0}'")]
    InvalidPair(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Operations(#[from] OperationsError),

    #[error("No invocation was recorded")]
    NothingRecorded,
}

pub type Result<T> = std::result::Result<T, ExplainError>;

/// Request form chosen on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Cql(String),
    Statement(Statement),
    Query(Query),
}

impl Request {
    const fn form(&self) -> &'static str {
        match self {
            Self::Cql(_) => "cql",
            Self::Statement(_) => "statement",
            Self::Query(_) => "query",
        }
    }
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

/// Parse a command-line literal into a bind value.
///
/// `null`, booleans, integers, floats and UUIDs are recognised; anything
/// else is text, with one pair of surrounding single quotes removed.
#[must_use]
pub fn parse_value(raw: &str) -> CqlValue {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("null") {
        return CqlValue::Null;
    }
    if let Ok(value) = raw.parse::<bool>() {
        return CqlValue::Boolean(value);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return CqlValue::BigInt(value);
    }
    if let Ok(value) = raw.parse::<f64>() {
        return CqlValue::Double(value);
    }
    if let Ok(value) = Uuid::parse_str(raw) {
        return CqlValue::Uuid(value);
    }
    let text = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    CqlValue::Text(text.to_string())
}

/// Parse a primary key literal. UUIDs and integers keep their type;
/// anything else is a text key.
#[must_use]
pub fn parse_id(raw: &str) -> EntityId {
    match parse_value(raw) {
        CqlValue::Uuid(id) => EntityId::Uuid(id),
        CqlValue::BigInt(id) => EntityId::BigInt(id),
        CqlValue::Text(id) => EntityId::Text(id),
        _ => EntityId::Text(raw.trim().to_string()),
    }
}

fn parse_pair(raw: &str) -> Result<(String, CqlValue)> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), parse_value(value)))
        }
        _ => Err(ExplainError::InvalidPair(raw.to_string())),
    }
}

impl FilterArgs {
    /// Equality criteria joined with `AND`, plus the limit.
    ///
    /// # Errors
    ///
    /// Returns an error for a filter that is not `COLUMN=VALUE`.
    pub fn to_query(&self) -> Result<Query> {
        let mut query = Query::empty();
        for filter in &self.filters {
            let (column, value) = parse_pair(filter)?;
            query = query.and(Criteria::column(column).is(value));
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        Ok(query)
    }
}

impl RequestArgs {
    /// # Errors
    ///
    /// Returns an error when zero or several request forms are given.
    pub fn to_request(&self) -> Result<Request> {
        match (&self.cql, &self.statement, self.filter.is_empty()) {
            (Some(_), _, false) | (_, Some(_), false) => {
                Err(ExplainError::ConflictingRequest("--where/--limit"))
            }
            (Some(_), Some(_), true) => Err(ExplainError::ConflictingRequest("--cql/--statement")),
            (Some(cql), None, true) => Ok(Request::Cql(cql.clone())),
            (None, Some(cql), true) => {
                let mut statement =
                    Statement::new(cql.as_str()).with_values(self.binds.iter().map(|b| parse_value(b)));
                if let Some(page_size) = self.page_size {
                    statement = statement.with_page_size(page_size)?;
                }
                Ok(Request::Statement(statement))
            }
            (None, None, false) => Ok(Request::Query(self.filter.to_query()?)),
            (None, None, true) => Err(ExplainError::MissingRequest),
        }
    }
}

fn to_update(assignments: &[String]) -> Result<Update> {
    assignments.iter().try_fold(Update::empty(), |update, raw| {
        let (column, value) = parse_pair(raw)?;
        Ok(update.set(column, value))
    })
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Run `command` through the typed facade for `T` and return what it
/// delegated.
///
/// # Errors
///
/// Returns an error for malformed arguments or request forms the operation
/// does not accept.
pub async fn explain<T: Entity>(ops: &RecordingOperations, command: Command) -> Result<Invocation> {
    match command {
        Command::Select(args) => match args.to_request()? {
            Request::Cql(cql) => {
                ops.typed().select::<T>(cql.as_str()).await?;
            }
            Request::Statement(statement) => {
                ops.typed().select::<T>(statement).await?;
            }
            Request::Query(query) => {
                ops.typed().select::<T>(query).await?;
            }
        },

        Command::SelectWith(args) => {
            let mut rows = 0_usize;
            match args.to_request()? {
                Request::Cql(cql) => {
                    ops.typed()
                        .select_with::<T>(cql.as_str(), |_| rows += 1)
                        .await?;
                }
                Request::Statement(statement) => {
                    ops.typed()
                        .select_with::<T>(statement, |_| rows += 1)
                        .await?;
                }
                request @ Request::Query(_) => {
                    return Err(ExplainError::UnsupportedForm {
                        operation: "select_with",
                        form: request.form(),
                    });
                }
            }
            tracing::debug!(rows, "Consumer finished");
        }

        Command::SelectOne(args) => match args.to_request()? {
            Request::Cql(cql) => {
                ops.typed().select_one::<T>(cql.as_str()).await?;
            }
            Request::Statement(statement) => {
                ops.typed().select_one::<T>(statement).await?;
            }
            Request::Query(query) => {
                ops.typed().select_one::<T>(query).await?;
            }
        },

        Command::Slice(args) => match args.to_request()? {
            Request::Statement(statement) => {
                ops.typed().slice::<T>(statement).await?;
            }
            Request::Query(query) => {
                ops.typed().slice::<T>(query).await?;
            }
            request @ Request::Cql(_) => {
                return Err(ExplainError::UnsupportedForm {
                    operation: "slice",
                    form: request.form(),
                });
            }
        },

        Command::Update {
            filter,
            assignments,
        } => {
            ops.typed()
                .update::<T>(filter.to_query()?, to_update(&assignments)?)
                .await?;
        }

        Command::Delete(filter) => {
            ops.typed().delete::<T>(filter.to_query()?).await?;
        }

        Command::Count(filter) if filter.is_empty() => {
            ops.typed().count::<T>().await?;
        }

        Command::Count(filter) => {
            ops.typed().count_matching::<T>(filter.to_query()?).await?;
        }

        Command::Exists { id: Some(_), filter } if !filter.is_empty() => {
            return Err(ExplainError::ConflictingRequest("--id/--where"));
        }

        Command::Exists { id: Some(id), .. } => {
            ops.typed().exists::<T>(parse_id(&id)).await?;
        }

        Command::Exists { id: None, filter } => {
            ops.typed().exists::<T>(filter.to_query()?).await?;
        }

        Command::SelectOneById { id } => {
            ops.typed().select_one_by_id::<T>(parse_id(&id)).await?;
        }

        Command::DeleteById { id } => {
            ops.typed().delete_by_id::<T>(parse_id(&id)).await?;
        }

        Command::Truncate => {
            ops.typed().truncate::<T>().await?;
        }
    }

    ops.last_invocation().ok_or(ExplainError::NothingRecorded)
}

/// [`explain`] for the entity picked at run time.
///
/// # Errors
///
/// See [`explain`].
pub async fn explain_for(
    entity: EntityKind,
    ops: &RecordingOperations,
    command: Command,
) -> Result<Invocation> {
    match entity {
        EntityKind::Person => explain::<Person>(ops, command).await,
        EntityKind::Account => explain::<Account>(ops, command).await,
    }
}

/// Render an invocation for stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(invocation: &Invocation, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(invocation),
        OutputFormat::Text => Ok(invocation.to_string()),
    }
}
