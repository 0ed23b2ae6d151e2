//! The serialized form of a dataset: exactly [`SHARD_COUNT`] shard documents.

use std::collections::BTreeMap;

use crate::error::DestekResult;
use crate::types::{DatasetId, HashKey, Record, SHARD_COUNT, ShardDocument, ShardId};

/// Returns the relative address of a shard document, `<dataset-id>/<shard-id>.json`.
pub fn shard_document_path(dataset: &DatasetId, shard: ShardId) -> String {
    format!("{dataset}/{}", shard.file_name())
}

/// An immutable, fully built dataset.
///
/// Every shard is present, empty ones included, and all share the same column list.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPackage {
    dataset: DatasetId,
    shards: Vec<ShardDocument>,
}

impl DatasetPackage {
    pub(crate) fn new(
        dataset: DatasetId,
        schema: Vec<String>,
        shards: Vec<BTreeMap<HashKey, Record>>,
    ) -> Self {
        let mut documents: Vec<ShardDocument> = shards
            .into_iter()
            .map(|data| ShardDocument {
                cols: schema.clone(),
                data,
            })
            .collect();
        documents.resize_with(SHARD_COUNT as usize, || ShardDocument::new(schema.clone()));

        Self {
            dataset,
            shards: documents,
        }
    }

    /// Creates a package of empty shards.
    pub fn empty(dataset: DatasetId, schema: Vec<String>) -> Self {
        Self::new(dataset, schema, Vec::new())
    }

    pub fn dataset(&self) -> &DatasetId {
        &self.dataset
    }

    /// Column list shared by every shard.
    pub fn schema(&self) -> &[String] {
        self.shards
            .first()
            .map(|shard| shard.cols.as_slice())
            .unwrap_or_default()
    }

    pub fn shard(&self, shard: ShardId) -> &ShardDocument {
        &self.shards[shard.index() as usize]
    }

    /// Iterates over every shard in ascending id order.
    pub fn shards(&self) -> impl Iterator<Item = (ShardId, &ShardDocument)> {
        ShardId::all().zip(self.shards.iter())
    }

    /// Encodes every shard to its wire format.
    pub fn encode(&self) -> DestekResult<Vec<(ShardId, Vec<u8>)>> {
        self.shards()
            .map(|(shard, document)| Ok((shard, document.encode()?)))
            .collect()
    }

    /// Number of distinct hash keys across all shards.
    pub fn record_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.data.len()).sum()
    }

    /// Number of stored source rows across all shards.
    pub fn row_count(&self) -> usize {
        self.shards.iter().map(ShardDocument::row_count).sum()
    }
}
