use std::fmt;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};

/// Largest magnitude printed in plain integer notation.
const MAX_PLAIN_INTEGER: f64 = 1e21;

/// A raw value from the source sheet, before any column transform is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Returns `true` for empty cells and text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Bool(_) | Cell::Number(_) => false,
        }
    }

    /// Returns the text a spreadsheet export would show for this cell.
    ///
    /// Integral numbers print without a fractional part, so an identity number stored as a
    /// numeric cell reads `12345678901` rather than `12345678901.0`.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(value) => value.to_string(),
            Cell::Number(value) => format_number(*value),
            Cell::Text(text) => text.clone(),
        }
    }
}

/// Formats a number the way spreadsheet exports stringify it.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_PLAIN_INTEGER {
        return format!("{value:.0}");
    }

    value.to_string()
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl TryFrom<serde_json::Value> for Cell {
    type Error = crate::error::DestekError;

    /// Converts one value of a JSON sheet export. Nested arrays and objects are rejected.
    fn try_from(value: serde_json::Value) -> DestekResult<Self> {
        let cell = match value {
            serde_json::Value::Null => Cell::Empty,
            serde_json::Value::Bool(value) => Cell::Bool(value),
            serde_json::Value::Number(number) => match number.as_f64() {
                Some(value) => Cell::Number(value),
                None => Cell::Text(number.to_string()),
            },
            serde_json::Value::String(text) => Cell::Text(text),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                bail!(
                    ErrorKind::InvalidSourceGrid,
                    "Sheet cells must be scalar values",
                    other
                )
            }
        };

        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(Cell::Number(12345678901.0).text(), "12345678901");
        assert_eq!(Cell::Number(-42.0).text(), "-42");
        assert_eq!(Cell::Number(-0.0).text(), "0");
        assert_eq!(Cell::Number(5600.5).text(), "5600.5");
    }

    #[test]
    fn blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::from("   ").is_blank());
        assert!(!Cell::from(" x ").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert!(!Cell::Bool(false).is_blank());
    }

    #[test]
    fn converts_json_scalars() {
        let cells: Vec<Cell> = serde_json::from_str::<Vec<serde_json::Value>>(
            r#"[null, true, 12345678901, 1.5, "Ali"]"#,
        )
        .unwrap()
        .into_iter()
        .map(|value| Cell::try_from(value).unwrap())
        .collect();

        assert_eq!(
            cells,
            vec![
                Cell::Empty,
                Cell::Bool(true),
                Cell::Number(12345678901.0),
                Cell::Number(1.5),
                Cell::from("Ali"),
            ]
        );
    }

    #[test]
    fn rejects_nested_json_values() {
        let err = Cell::try_from(serde_json::json!([1, 2])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidSourceGrid);
    }
}
