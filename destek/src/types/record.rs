use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bail;
use crate::error::{DestekResult, ErrorKind};
use crate::types::{HashKey, Row};

/// Everything stored under one hash key.
///
/// On the wire a single row is a flat array and a group is an array of arrays. The variants
/// are explicit here so nothing downstream has to inspect the nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// The identity appeared once.
    Single(Row),
    /// The identity appeared several times; rows are in first-seen order.
    Multiple(Vec<Row>),
}

impl Record {
    /// Adds another row for the same identity, promoting a single row to a group.
    pub fn push(&mut self, row: Row) {
        match self {
            Record::Single(existing) => {
                let existing = std::mem::take(existing);
                *self = Record::Multiple(vec![existing, row]);
            }
            Record::Multiple(rows) => rows.push(row),
        }
    }

    /// Returns the rows in storage order.
    pub fn rows(&self) -> &[Row] {
        match self {
            Record::Single(row) => std::slice::from_ref(row),
            Record::Multiple(rows) => rows,
        }
    }

    /// Number of source rows held by this record.
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// One shard of a dataset: the shared column list and the records routed to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShardDocument {
    pub cols: Vec<String>,
    pub data: BTreeMap<HashKey, Record>,
}

impl ShardDocument {
    /// Creates an empty shard with the given column list.
    pub fn new(cols: Vec<String>) -> Self {
        Self {
            cols,
            data: BTreeMap::new(),
        }
    }

    /// Decodes and validates a fetched shard document.
    ///
    /// Any parse failure or row whose length differs from `cols` is reported as
    /// [`ErrorKind::MalformedShard`].
    pub fn decode(bytes: &[u8]) -> DestekResult<Self> {
        let document: ShardDocument = match serde_json::from_slice(bytes) {
            Ok(document) => document,
            Err(err) => bail!(
                ErrorKind::MalformedShard,
                "Shard document could not be parsed",
                err.to_string(),
                source: err
            ),
        };

        document.validate()?;

        Ok(document)
    }

    /// Serializes the shard in its wire format.
    pub fn encode(&self) -> DestekResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Checks that every stored row is aligned with `cols`.
    pub fn validate(&self) -> DestekResult<()> {
        for (key, record) in &self.data {
            if record.is_empty() {
                bail!(
                    ErrorKind::MalformedShard,
                    "Shard document holds an empty row group",
                    key
                );
            }

            if let Some(row) = record.rows().iter().find(|row| row.len() != self.cols.len()) {
                bail!(
                    ErrorKind::MalformedShard,
                    "Shard row length differs from the column count",
                    detail = format!(
                        "key {key} has {} values for {} columns",
                        row.len(),
                        self.cols.len()
                    )
                );
            }
        }

        Ok(())
    }

    /// Number of stored source rows, counting every row of a group.
    pub fn row_count(&self) -> usize {
        self.data.values().map(Record::len).sum()
    }
}
