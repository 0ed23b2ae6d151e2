use std::collections::BTreeMap;

use config::shared::IngestConfig;
use tracing::debug;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};
use crate::ingest::classify::ColumnPlan;
use crate::ingest::header::{header_row_index, resolve_headers};
use crate::ingest::report::FileReport;
use crate::package::DatasetPackage;
use crate::routing::shard_for;
use crate::types::{Cell, DatasetId, HashKey, Record, Row, SHARD_COUNT};

/// What happened to a row handed to [`ShardAccumulator::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First row for its hash key.
    Inserted,
    /// Appended to the record of an identity seen before.
    Merged,
}

/// Mutable state of one ingestion run: the frozen schema and the 100 per-shard maps.
///
/// Rows are never overwritten. A repeated hash key turns the stored row into a group and
/// further repeats are appended, in first-seen order.
#[derive(Debug)]
pub struct ShardAccumulator {
    schema: Option<Vec<String>>,
    shards: Vec<BTreeMap<HashKey, Record>>,
}

impl ShardAccumulator {
    pub fn new() -> Self {
        Self {
            schema: None,
            shards: (0..SHARD_COUNT).map(|_| BTreeMap::new()).collect(),
        }
    }

    /// Fixes the dataset schema on first call; later calls must pass the same schema.
    ///
    /// Must be called before any row of a source file is inserted.
    pub fn freeze_schema(&mut self, schema: Vec<String>) -> DestekResult<()> {
        match &self.schema {
            None => {
                self.schema = Some(schema);
                Ok(())
            }
            Some(frozen) if *frozen == schema => Ok(()),
            Some(frozen) => bail!(
                ErrorKind::SchemaMismatch,
                "Source file columns differ from the dataset schema",
                detail = format!("expected {frozen:?}, found {schema:?}")
            ),
        }
    }

    pub fn schema(&self) -> Option<&[String]> {
        self.schema.as_deref()
    }

    /// Stores `row` under `key` in the shard the key routes to.
    pub fn insert(&mut self, key: HashKey, row: Row) -> MergeOutcome {
        let shard = shard_for(&key);
        let records = &mut self.shards[shard.index() as usize];

        match records.get_mut(&key) {
            Some(record) => {
                record.push(row);
                MergeOutcome::Merged
            }
            None => {
                records.insert(key, Record::Single(row));
                MergeOutcome::Inserted
            }
        }
    }

    /// Number of distinct hash keys stored.
    pub fn record_count(&self) -> usize {
        self.shards.iter().map(BTreeMap::len).sum()
    }

    /// Turns the accumulated shards into an immutable package.
    pub fn into_package(self, dataset: DatasetId) -> DatasetPackage {
        DatasetPackage::new(dataset, self.schema.unwrap_or_default(), self.shards)
    }
}

impl Default for ShardAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges every data row of one sheet into `accumulator`.
///
/// The sheet is classified and its schema frozen before the first row is inserted, so a
/// sheet either merges completely or not at all.
pub fn merge_sheet(
    accumulator: &mut ShardAccumulator,
    file: &str,
    grid: &[Vec<Cell>],
    config: &IngestConfig,
) -> DestekResult<FileReport> {
    let headers = resolve_headers(grid, &config.header)?;
    let Some(header_index) = header_row_index(grid, &config.header)? else {
        bail!(ErrorKind::HeaderRowOutOfRange, "Header row number must be 1 or greater");
    };

    let plan = ColumnPlan::classify(&headers, config)?;
    accumulator.freeze_schema(plan.schema())?;

    let mut report = FileReport {
        file: file.to_string(),
        ..FileReport::default()
    };

    for row in &grid[header_index + 1..] {
        if row.iter().all(Cell::is_blank) {
            report.blank_rows += 1;
            continue;
        }

        let Some(key) = plan.identity_key(row) else {
            report.rows_without_identity += 1;
            continue;
        };

        let values = plan.build_row(row, &config.currency);
        if accumulator.insert(key, values) == MergeOutcome::Merged {
            debug!(shard_id = %shard_for(&key), "merged duplicate identity");
            report.duplicate_rows += 1;
        }
        report.accepted_rows += 1;
    }

    Ok(report)
}
