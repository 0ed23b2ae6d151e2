use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::load::Config;
use crate::shared::{ColumnRef, ColumnRole, ValidationError};

/// Location of the header within the source sheet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderConfig {
    /// 1-based row number holding the column headers.
    ///
    /// Default: 1
    #[serde(default = "default_header_row")]
    pub row: u32,
    /// Whether the row above the header row holds parent labels that prefix the headers.
    ///
    /// Default: false
    #[serde(default)]
    pub merge_parent: bool,
    /// Whether a parent label carries rightward over blank parent cells, as merged cells do.
    ///
    /// Default: false
    #[serde(default)]
    pub fill_forward_parent: bool,
}

fn default_header_row() -> u32 {
    1
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            row: default_header_row(),
            merge_parent: false,
            fill_forward_parent: false,
        }
    }
}

/// Columns holding the identity number.
///
/// The alternate column is consulted only for rows whose primary value is unusable.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityColumnsConfig {
    /// National id style column (11 digits).
    #[serde(default)]
    pub primary: Option<ColumnRef>,
    /// Tax id style column (10 digits).
    #[serde(default)]
    pub alternate: Option<ColumnRef>,
}

impl IdentityColumnsConfig {
    /// Returns the configured identity columns in priority order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnRef> + '_ {
        self.primary.iter().chain(self.alternate.iter()).copied()
    }

    /// Returns `true` if `column` is one of the identity columns.
    pub fn contains(&self, column: ColumnRef) -> bool {
        self.columns().any(|identity| identity == column)
    }
}

/// Roles assigned to non-identity columns. Unlisted columns pass through unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnRolesConfig {
    #[serde(default)]
    pub currency: Vec<ColumnRef>,
    #[serde(default)]
    pub masked: Vec<ColumnRef>,
    #[serde(default)]
    pub ignored: Vec<ColumnRef>,
    /// At most one title column.
    #[serde(default)]
    pub title: Option<ColumnRef>,
}

impl ColumnRolesConfig {
    /// Flattens the role lists into a single column to role map.
    ///
    /// Fails if a column is listed under two different roles. Listing a column twice under
    /// the same role is harmless.
    pub fn roles(&self) -> Result<BTreeMap<ColumnRef, ColumnRole>, ValidationError> {
        let assignments = self
            .currency
            .iter()
            .map(|column| (*column, ColumnRole::Currency))
            .chain(self.masked.iter().map(|column| (*column, ColumnRole::Masked)))
            .chain(self.ignored.iter().map(|column| (*column, ColumnRole::Ignored)))
            .chain(self.title.iter().map(|column| (*column, ColumnRole::Title)));

        let mut roles = BTreeMap::new();
        for (column, role) in assignments {
            match roles.insert(column, role) {
                Some(previous) if previous != role => {
                    return Err(ValidationError::ConflictingColumnRoles {
                        column,
                        first: previous,
                        second: role,
                    });
                }
                _ => {}
            }
        }

        Ok(roles)
    }
}

/// Rendering of currency columns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyFormatConfig {
    /// Symbol appended after a single space.
    ///
    /// Default: `₺`
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    /// Separator between groups of three integer digits.
    ///
    /// Default: `.`
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    /// Separator between the integer and fraction digits.
    ///
    /// Default: `,`
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
}

fn default_currency_symbol() -> String {
    "₺".to_string()
}

fn default_thousands_separator() -> String {
    ".".to_string()
}

fn default_decimal_separator() -> String {
    ",".to_string()
}

impl Default for CurrencyFormatConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

/// One ingestion run: which sheet layout to expect and how to treat each column.
///
/// Built once per run and passed into the pipeline unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestConfig {
    /// Output namespace; shards are written under `<dataset_id>/`.
    ///
    /// May be left empty in a job file when the runner supplies it.
    #[serde(default)]
    pub dataset_id: String,
    #[serde(default)]
    pub header: HeaderConfig,
    pub identity: IdentityColumnsConfig,
    #[serde(default)]
    pub columns: ColumnRolesConfig,
    #[serde(default)]
    pub currency: CurrencyFormatConfig,
}

impl IngestConfig {
    /// Validates the job before any file is read.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dataset_id.trim().is_empty() {
            return Err(ValidationError::EmptyDatasetId);
        }

        if self.header.row == 0 {
            return Err(ValidationError::HeaderRowZero);
        }

        match (self.identity.primary, self.identity.alternate) {
            (None, None) => return Err(ValidationError::MissingIdentityColumn),
            (Some(primary), Some(alternate)) if primary == alternate => {
                return Err(ValidationError::IdentityColumnsOverlap(primary));
            }
            _ => {}
        }

        let roles = self.columns.roles()?;
        if let Some((column, role)) = roles
            .iter()
            .find(|(column, _)| self.identity.contains(**column))
        {
            return Err(ValidationError::RoleOnIdentityColumn {
                column: *column,
                role: *role,
            });
        }

        if self.currency.decimal_separator.is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "currency.decimal_separator".to_string(),
                constraint: "cannot be empty".to_string(),
            });
        }

        if self.currency.decimal_separator == self.currency.thousands_separator {
            return Err(ValidationError::InvalidFieldValue {
                field: "currency.thousands_separator".to_string(),
                constraint: "must differ from `currency.decimal_separator`".to_string(),
            });
        }

        Ok(())
    }
}

impl Config for IngestConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] =
        &["columns.currency", "columns.masked", "columns.ignored"];
}
