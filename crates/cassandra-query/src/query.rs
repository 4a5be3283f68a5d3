//! Structured queries: criteria, projection, ordering and paging.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, Result};
use crate::statement::PagingState;
use crate::value::CqlValue;

// =============================================================================
// CRITERIA
// =============================================================================

/// Comparison operator of a single criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
    ContainsKey,
    Like,
    IsNotNull,
}

impl Operator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::Contains => "CONTAINS",
            Self::ContainsKey => "CONTAINS KEY",
            Self::Like => "LIKE",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

/// A `column OP value` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    column: String,
    operator: Operator,
    value: Option<CqlValue>,
}

impl Criteria {
    /// Start a criteria on `column`.
    ///
    /// ```rust
    /// use cassandra_query::Criteria;
    ///
    /// let criteria = Criteria::column("last_name").is("Doe");
    /// assert_eq!(criteria.to_string(), "last_name = 'Doe'");
    /// ```
    pub fn column(column: impl Into<String>) -> CriteriaBuilder {
        CriteriaBuilder {
            column: column.into(),
        }
    }

    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> Option<&CqlValue> {
        self.value.as_ref()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.operator, &self.value) {
            (Operator::In, Some(CqlValue::List(values))) => {
                write!(f, "{} IN (", self.column)?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            (operator, Some(value)) => write!(f, "{} {} {value}", self.column, operator.as_str()),
            (operator, None) => write!(f, "{} {}", self.column, operator.as_str()),
        }
    }
}

/// Column-bound half of a [`Criteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CriteriaBuilder {
    column: String,
}

impl CriteriaBuilder {
    fn with(self, operator: Operator, value: Option<CqlValue>) -> Criteria {
        Criteria {
            column: self.column,
            operator,
            value,
        }
    }

    pub fn is(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Eq, Some(value.into()))
    }

    pub fn ne(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Ne, Some(value.into()))
    }

    pub fn lt(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Lt, Some(value.into()))
    }

    pub fn lte(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Lte, Some(value.into()))
    }

    pub fn gt(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Gt, Some(value.into()))
    }

    pub fn gte(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Gte, Some(value.into()))
    }

    /// `column IN (values...)`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInList`] when `values` is empty.
    pub fn in_values<V: Into<CqlValue>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Criteria> {
        let values: Vec<CqlValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(QueryError::EmptyInList {
                column: self.column,
            });
        }
        Ok(self.with(Operator::In, Some(CqlValue::List(values))))
    }

    /// `column CONTAINS value` for collection columns.
    pub fn contains(self, value: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::Contains, Some(value.into()))
    }

    /// `column CONTAINS KEY key` for map columns.
    pub fn contains_key(self, key: impl Into<CqlValue>) -> Criteria {
        self.with(Operator::ContainsKey, Some(key.into()))
    }

    pub fn like(self, pattern: impl Into<String>) -> Criteria {
        self.with(Operator::Like, Some(CqlValue::Text(pattern.into())))
    }

    pub fn is_not_null(self) -> Criteria {
        self.with(Operator::IsNotNull, None)
    }
}

// =============================================================================
// PROJECTION & ORDERING
// =============================================================================

/// Selected columns. Empty means all columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns(Vec<String>);

impl Columns {
    #[must_use]
    pub const fn all() -> Self {
        Self(Vec::new())
    }

    pub fn include<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self(columns.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            f.write_str("*")
        } else {
            f.write_str(&self.0.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Ordering on one clustering column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Ordering clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort(Vec<Order>);

impl Sort {
    #[must_use]
    pub const fn unsorted() -> Self {
        Self(Vec::new())
    }

    pub fn by(column: impl Into<String>) -> Self {
        Self::unsorted().then(column, Direction::Asc)
    }

    pub fn by_desc(column: impl Into<String>) -> Self {
        Self::unsorted().then(column, Direction::Desc)
    }

    #[must_use]
    pub fn then(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.0.push(Order {
            column: column.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.0
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// Structured query against an entity's table.
///
/// ```rust
/// use cassandra_query::{Criteria, Query, Sort};
///
/// let query = Query::matching(Criteria::column("last_name").is("Doe"))
///     .sort(Sort::by("first_name"))
///     .with_limit(10);
///
/// assert_eq!(
///     query.to_string(),
///     "WHERE last_name = 'Doe' ORDER BY first_name ASC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    criteria: Vec<Criteria>,
    columns: Columns,
    sort: Sort,
    limit: Option<u32>,
    page_size: Option<u32>,
    paging_state: Option<PagingState>,
    allow_filtering: bool,
}

impl Query {
    /// Query with no criteria, projection, ordering or paging.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matching(criteria: Criteria) -> Self {
        Self::empty().and(criteria)
    }

    /// Add a criteria. One with the same column and operator replaces the
    /// existing entry in place.
    #[must_use]
    pub fn and(mut self, criteria: Criteria) -> Self {
        match self
            .criteria
            .iter_mut()
            .find(|c| c.column == criteria.column && c.operator == criteria.operator)
        {
            Some(existing) => *existing = criteria,
            None => self.criteria.push(criteria),
        }
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

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

    #[must_use]
    pub fn with_paging_state(mut self, paging_state: PagingState) -> Self {
        self.paging_state = Some(paging_state);
        self
    }

    #[must_use]
    pub const fn with_allow_filtering(mut self) -> Self {
        self.allow_filtering = true;
        self
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criteria] {
        &self.criteria
    }

    #[must_use]
    pub const fn selected_columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub const fn ordering(&self) -> &Sort {
        &self.sort
    }

    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    #[must_use]
    pub const fn paging_state(&self) -> Option<&PagingState> {
        self.paging_state.as_ref()
    }

    #[must_use]
    pub const fn is_allow_filtering(&self) -> bool {
        self.allow_filtering
    }

    /// Whether this equals [`Query::empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
            && self.columns.is_all()
            && self.sort.is_unsorted()
            && self.limit.is_none()
            && self.page_size.is_none()
            && self.paging_state.is_none()
            && !self.allow_filtering
    }
}

impl fmt::Display for Query {
    /// Renders the clauses that follow `FROM <table>`. Projection and
    /// paging have no place there and are appended as bracketed markers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();

        if !self.criteria.is_empty() {
            let predicates: Vec<String> = self.criteria.iter().map(ToString::to_string).collect();
            clauses.push(format!("WHERE {}", predicates.join(" AND ")));
        }

        if !self.sort.is_unsorted() {
            let orders: Vec<String> = self
                .sort
                .orders()
                .iter()
                .map(|o| match o.direction {
                    Direction::Asc => format!("{} ASC", o.column),
                    Direction::Desc => format!("{} DESC", o.column),
                })
                .collect();
            clauses.push(format!("ORDER BY {}", orders.join(", ")));
        }

        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {limit}"));
        }

        if self.allow_filtering {
            clauses.push("ALLOW FILTERING".to_string());
        }

        if !self.columns.is_all() {
            clauses.push(format!("[columns: {}]", self.columns));
        }

        if let Some(page_size) = self.page_size {
            clauses.push(format!("[page_size: {page_size}]"));
        }

        if let Some(paging_state) = &self.paging_state {
            clauses.push(format!("[paging_state: {paging_state}]"));
        }

        f.write_str(&clauses.join(" "))
    }
}
