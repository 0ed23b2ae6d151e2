use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of letters accepted in a column reference (`XFD` is the last Excel column).
const MAX_COLUMN_LETTERS: usize = 3;

/// Reference to a spreadsheet column by its letters (`A`, `C`, `AA`).
///
/// Internally stored as the 0-based column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnRef(usize);

impl ColumnRef {
    /// Creates a reference from a 0-based column index.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the 0-based column index.
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Renders the column as spreadsheet letters.
    pub fn letters(&self) -> String {
        let mut remaining = self.0 + 1;
        let mut letters = Vec::new();
        while remaining > 0 {
            remaining -= 1;
            letters.push(b'A' + (remaining % 26) as u8);
            remaining /= 26;
        }
        letters.reverse();

        letters.into_iter().map(char::from).collect()
    }
}

/// Errors produced when parsing a [`ColumnRef`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnRefError {
    #[error("column reference cannot be empty")]
    Empty,
    #[error("column reference `{0}` must contain only letters A-Z")]
    InvalidCharacter(String),
    #[error("column reference `{0}` is longer than {MAX_COLUMN_LETTERS} letters")]
    TooLong(String),
}

impl FromStr for ColumnRef {
    type Err = ColumnRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters = s.trim();
        if letters.is_empty() {
            return Err(ColumnRefError::Empty);
        }
        if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ColumnRefError::InvalidCharacter(letters.to_string()));
        }
        if letters.len() > MAX_COLUMN_LETTERS {
            return Err(ColumnRefError::TooLong(letters.to_string()));
        }

        let number = letters
            .bytes()
            .map(|b| b.to_ascii_uppercase())
            .fold(0usize, |acc, b| acc * 26 + usize::from(b - b'A' + 1));

        Ok(Self(number - 1))
    }
}

impl TryFrom<String> for ColumnRef {
    type Error = ColumnRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnRef> for String {
    fn from(value: ColumnRef) -> Self {
        value.letters()
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

/// Role an operator assigns to a non-identity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Value is passed through unchanged.
    #[default]
    None,
    /// Value is rendered as a grouped decimal amount with the currency suffix.
    Currency,
    /// Personal-name value is redacted.
    Masked,
    /// Column is excluded from the output.
    Ignored,
    /// Value is stored in the trailing `_title` column only.
    Title,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::None => "none",
            ColumnRole::Currency => "currency",
            ColumnRole::Masked => "masked",
            ColumnRole::Ignored => "ignored",
            ColumnRole::Title => "title",
        };

        f.write_str(name)
    }
}
