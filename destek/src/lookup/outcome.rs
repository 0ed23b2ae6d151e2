use indexmap::IndexMap;
use serde::Serialize;

use crate::ingest::classify::TITLE_COLUMN;
use crate::types::{Record, Row, Scalar};

/// One decoded row: column names paired with the stored values, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamedRecord {
    fields: IndexMap<String, Scalar>,
}

impl NamedRecord {
    /// Pairs `cols[i]` with `row[i]`.
    ///
    /// Rows are validated against the column list when a shard document is decoded.
    pub fn new(cols: &[String], row: Row) -> Self {
        let fields = cols.iter().cloned().zip(row).collect();

        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields.get(column)
    }

    /// All fields in column order, including the title and empty values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Fields worth showing to a person: the title and empty values are left out.
    pub fn visible_fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields()
            .filter(|(name, value)| *name != TITLE_COLUMN && !value.is_empty())
    }

    /// Returns the title of this record, when one was stored and is not blank.
    pub fn title(&self) -> Option<String> {
        self.get(TITLE_COLUMN)
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
    }
}

/// The result of looking up one identity number.
///
/// Finding nothing is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "records", rename_all = "snake_case")]
pub enum LookupOutcome {
    NoRecord,
    Single(NamedRecord),
    /// Records of a duplicated identity, in storage order.
    Multiple(Vec<NamedRecord>),
}

impl LookupOutcome {
    /// Decodes a stored record against its shard's column list.
    pub fn from_record(cols: &[String], record: Record) -> Self {
        match record {
            Record::Single(row) => LookupOutcome::Single(NamedRecord::new(cols, row)),
            Record::Multiple(rows) => LookupOutcome::Multiple(
                rows.into_iter()
                    .map(|row| NamedRecord::new(cols, row))
                    .collect(),
            ),
        }
    }

    /// Returns the decoded records, empty when nothing was found.
    pub fn records(&self) -> &[NamedRecord] {
        match self {
            LookupOutcome::NoRecord => &[],
            LookupOutcome::Single(record) => std::slice::from_ref(record),
            LookupOutcome::Multiple(records) => records,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, LookupOutcome::NoRecord)
    }
}
