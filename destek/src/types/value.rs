use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A stored field value.
///
/// Rows only ever hold scalars; there is no null, a missing value is the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// An ordered sequence of values aligned with a shard's column list.
pub type Row = Vec<Scalar>;

impl Scalar {
    /// Returns the empty text value used as filler for missing cells.
    pub fn empty() -> Self {
        Scalar::Text(String::new())
    }

    /// Returns `true` for empty or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(text) if text.trim().is_empty())
    }

    /// Returns the text value, if this is a text scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&Cell> for Scalar {
    /// Stores a cell without transforming it.
    ///
    /// Integral numbers become JSON integers, other finite numbers stay floats.
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Empty => Scalar::empty(),
            Cell::Bool(value) => Scalar::Bool(*value),
            Cell::Number(value) if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER => {
                Scalar::Number(serde_json::Number::from(*value as i64))
            }
            Cell::Number(value) => match serde_json::Number::from_f64(*value) {
                Some(number) => Scalar::Number(number),
                None => Scalar::Text(cell.text()),
            },
            Cell::Text(text) => Scalar::Text(text.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Number(number) => write!(f, "{number}"),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}
