//! CQL statements.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, Result};
use crate::value::CqlValue;

/// Opaque driver paging cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagingState(Vec<u8>);

impl PagingState {
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PagingState {
    /// Hex dump of the opaque driver cursor.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A CQL statement with positional bind values.
///
/// ```rust
/// use cassandra_query::Statement;
///
/// let statement = Statement::new("SELECT * FROM person WHERE id = ?").bind("id-123");
/// assert_eq!(statement.values().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    cql: String,
    values: Vec<CqlValue>,
    page_size: Option<u32>,
    paging_state: Option<PagingState>,
}

impl Statement {
    /// Create a statement without bind values.
    pub fn new(cql: impl Into<String>) -> Self {
        Self {
            cql: cql.into(),
            values: Vec::new(),
            page_size: None,
            paging_state: None,
        }
    }

    /// Append a positional bind value.
    #[must_use]
    pub fn bind(mut self, value: impl Into<CqlValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Replace all bind values.
    #[must_use]
    pub fn with_values<V: Into<CqlValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fetch size for paged execution.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPageSize`] when `page_size` is zero.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }
        self.page_size = Some(page_size);
        Ok(self)
    }

    /// Resume from a previously returned cursor.
    #[must_use]
    pub fn with_paging_state(mut self, paging_state: PagingState) -> Self {
        self.paging_state = Some(paging_state);
        self
    }

    #[must_use]
    pub fn cql(&self) -> &str {
        &self.cql
    }

    #[must_use]
    pub fn values(&self) -> &[CqlValue] {
        &self.values
    }

    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    #[must_use]
    pub const fn paging_state(&self) -> Option<&PagingState> {
        self.paging_state.as_ref()
    }
}

impl From<&str> for Statement {
    fn from(cql: &str) -> Self {
        Self::new(cql)
    }
}

impl From<String> for Statement {
    fn from(cql: String) -> Self {
        Self::new(cql)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cql)?;
        if !self.values.is_empty() {
            write!(f, " {}", CqlValue::List(self.values.clone()))?;
        }
        if let Some(page_size) = self.page_size {
            write!(f, " [page_size: {page_size}]")?;
        }
        if let Some(paging_state) = &self.paging_state {
            write!(f, " [paging_state: {paging_state}]")?;
        }
        Ok(())
    }
}
