//! Column assignments for `UPDATE` statements.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, Result};
use crate::value::CqlValue;

/// How a column is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AssignmentOp {
    Set { value: CqlValue },
    SetAtIndex { index: usize, value: CqlValue },
    SetAtKey { key: CqlValue, value: CqlValue },
    Increment { delta: i64 },
    Append { value: CqlValue },
    Prepend { value: CqlValue },
    Remove { value: CqlValue },
    Clear,
}

/// A single `column = ...` assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub op: AssignmentOp,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = &self.column;
        match &self.op {
            AssignmentOp::Set { value } => write!(f, "{column} = {value}"),
            AssignmentOp::SetAtIndex { index, value } => write!(f, "{column}[{index}] = {value}"),
            AssignmentOp::SetAtKey { key, value } => write!(f, "{column}[{key}] = {value}"),
            AssignmentOp::Increment { delta } if *delta < 0 => {
                write!(f, "{column} = {column} - {}", delta.unsigned_abs())
            }
            AssignmentOp::Increment { delta } => write!(f, "{column} = {column} + {delta}"),
            AssignmentOp::Append { value } => write!(f, "{column} = {column} + {value}"),
            AssignmentOp::Prepend { value } => write!(f, "{column} = {value} + {column}"),
            AssignmentOp::Remove { value } => write!(f, "{column} = {column} - {value}"),
            AssignmentOp::Clear => write!(f, "{column} = []"),
        }
    }
}

/// Set of column assignments. Assigning a column twice keeps the last
/// assignment at the position of the first.
///
/// ```rust
/// use cassandra_query::Update;
///
/// let update = Update::empty().set("first_name", "Jane").increment("visits", 1);
/// assert_eq!(update.to_string(), "SET first_name = 'Jane', visits = visits + 1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update(Vec<Assignment>);

impl Update {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn assign(mut self, column: impl Into<String>, op: AssignmentOp) -> Self {
        let column = column.into();
        match self.0.iter_mut().find(|a| a.column == column) {
            Some(existing) => existing.op = op,
            None => self.0.push(Assignment { column, op }),
        }
        self
    }

    #[must_use]
    pub fn set(self, column: impl Into<String>, value: impl Into<CqlValue>) -> Self {
        self.assign(column, AssignmentOp::Set { value: value.into() })
    }

    /// `column[index] = value` on a list column.
    #[must_use]
    pub fn set_at_index(
        self,
        column: impl Into<String>,
        index: usize,
        value: impl Into<CqlValue>,
    ) -> Self {
        self.assign(
            column,
            AssignmentOp::SetAtIndex {
                index,
                value: value.into(),
            },
        )
    }

    /// `column[key] = value` on a map column.
    #[must_use]
    pub fn set_at_key(
        self,
        column: impl Into<String>,
        key: impl Into<CqlValue>,
        value: impl Into<CqlValue>,
    ) -> Self {
        self.assign(
            column,
            AssignmentOp::SetAtKey {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    /// Counter increment.
    #[must_use]
    pub fn increment(self, column: impl Into<String>, delta: i64) -> Self {
        self.assign(column, AssignmentOp::Increment { delta })
    }

    /// Counter decrement, stored as a negative increment.
    ///
    /// # Errors
    ///
    /// Returns an error if `delta` has no negation (`i64::MIN`).
    pub fn decrement(self, column: impl Into<String>, delta: i64) -> Result<Self> {
        let column = column.into();
        match delta.checked_neg() {
            Some(delta) => Ok(self.assign(column, AssignmentOp::Increment { delta })),
            None => Err(QueryError::DeltaOutOfRange { column }),
        }
    }

    /// Append to a list or add to a set.
    #[must_use]
    pub fn add_to(self, column: impl Into<String>, value: impl Into<CqlValue>) -> Self {
        self.assign(
            column,
            AssignmentOp::Append {
                value: value.into().into_list(),
            },
        )
    }

    #[must_use]
    pub fn prepend(self, column: impl Into<String>, value: impl Into<CqlValue>) -> Self {
        self.assign(
            column,
            AssignmentOp::Prepend {
                value: value.into().into_list(),
            },
        )
    }

    /// Remove elements from a list or set.
    #[must_use]
    pub fn remove(self, column: impl Into<String>, value: impl Into<CqlValue>) -> Self {
        self.assign(
            column,
            AssignmentOp::Remove {
                value: value.into().into_list(),
            },
        )
    }

    #[must_use]
    pub fn clear(self, column: impl Into<String>) -> Self {
        self.assign(column, AssignmentOp::Clear)
    }

    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Update {
    /// Renders the `SET` clause; empty updates render as an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("SET ")?;
        for (i, assignment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{assignment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        assert!(Update::empty().is_empty());
        assert_eq!(Update::empty(), Update::default());
        assert_eq!(Update::empty().to_string(), "");
    }

    #[test]
    fn test_reassigning_column_keeps_position() {
        let update = Update::empty()
            .set("first_name", "Jane")
            .set("last_name", "Doe")
            .set("first_name", "Joan");

        assert_eq!(update.assignments().len(), 2);
        assert_eq!(
            update.to_string(),
            "SET first_name = 'Joan', last_name = 'Doe'"
        );
    }

    #[test]
    fn test_collection_assignments() {
        let update = Update::empty()
            .add_to("tags", "vip")
            .prepend("history", vec!["signup"])
            .remove("aliases", "jd")
            .set_at_index("phones", 1, "555-0100")
            .set_at_key("attributes", "tier", "gold")
            .clear("notes");

        assert_eq!(
            update.to_string(),
            "SET tags = tags + ['vip'], history = ['signup'] + history, \
             aliases = aliases - ['jd'], phones[1] = '555-0100', \
             attributes['tier'] = 'gold', notes = []"
        );
    }

    #[test]
    fn test_counter_decrement() {
        let update = Update::empty().decrement("credits", 3).unwrap();

        assert_eq!(
            update.assignments()[0].op,
            AssignmentOp::Increment { delta: -3 }
        );
        assert_eq!(update.to_string(), "SET credits = credits - 3");
    }

    #[test]
    fn test_decrement_by_min_is_rejected() {
        assert_eq!(
            Update::empty().decrement("credits", i64::MIN),
            Err(QueryError::DeltaOutOfRange {
                column: "credits".to_string()
            })
        );

        let update = Update::empty().decrement("credits", i64::MAX).unwrap();
        assert_eq!(
            update.to_string(),
            format!("SET credits = credits - {}", i64::MAX)
        );
    }

    #[test]
    fn test_increment_by_min_renders_magnitude() {
        let update = Update::empty().increment("credits", i64::MIN);

        assert_eq!(
            update.to_string(),
            format!("SET credits = credits - {}", i64::MIN.unsigned_abs())
        );
    }
}
