use crate::error::DestekError;
use crate::types::DatasetId;

/// Row counts for one successfully merged source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    /// Rows stored in the dataset, duplicates included.
    pub accepted_rows: usize,
    /// Rows with every cell empty.
    pub blank_rows: usize,
    /// Rows whose identity columns held no usable value.
    pub rows_without_identity: usize,
    /// Accepted rows whose identity had already been seen, in this file or an earlier one.
    pub duplicate_rows: usize,
}

/// A source file that was rejected as a whole.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub error: DestekError,
}

/// Outcome of one ingestion run over one or more source files.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub dataset_id: DatasetId,
    /// Output column list shared by every shard.
    pub schema: Vec<String>,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    /// Distinct hash keys stored across all shards.
    pub records: usize,
}

impl IngestReport {
    /// Total rows stored across all files.
    pub fn accepted_rows(&self) -> usize {
        self.files.iter().map(|file| file.accepted_rows).sum()
    }

    /// Total duplicate rows merged into existing records.
    pub fn duplicate_rows(&self) -> usize {
        self.files.iter().map(|file| file.duplicate_rows).sum()
    }

    /// Returns `true` when no row qualified; the dataset then consists of empty shards.
    pub fn is_empty(&self) -> bool {
        self.accepted_rows() == 0
    }

    /// Aggregates the errors of every failed file, if any.
    pub fn failure(&self) -> Option<DestekError> {
        if self.failures.is_empty() {
            return None;
        }

        let errors: Vec<DestekError> = self
            .failures
            .iter()
            .map(|failure| failure.error.clone())
            .collect();

        Some(errors.into())
    }
}
