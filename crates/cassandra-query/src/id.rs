//! Primary key values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::value::CqlValue;

/// Identifier of a single entity row.
///
/// Single-column keys use the scalar variants; compound primary keys
/// are expressed as a column to value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntityId {
    Text(String),
    Uuid(Uuid),
    BigInt(i64),
    Composite(BTreeMap<String, CqlValue>),
}

impl EntityId {
    /// Build a compound key from `(column, value)` pairs.
    pub fn composite<K, V>(parts: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<CqlValue>,
    {
        Self::Composite(
            parts
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(id) => write!(f, "{id}"),
            Self::Uuid(id) => write!(f, "{id}"),
            Self::BigInt(id) => write!(f, "{id}"),
            Self::Composite(parts) => {
                f.write_str("{")?;
                for (i, (column, value)) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{column}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::BigInt(id)
    }
}
