use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::info;

use crate::destination::Destination;
use crate::error::DestekResult;
use crate::package::DatasetPackage;
use crate::store::memory::MemoryShardStore;
use crate::types::{DatasetId, ShardDocument, ShardId};

#[derive(Debug, Default)]
struct Inner {
    datasets: HashMap<DatasetId, Vec<(ShardId, Bytes)>>,
    writes: usize,
}

/// In-memory destination for tests and development.
///
/// Keeps the encoded shard documents of every written dataset, exactly as they would be
/// published, so they can be inspected or served back through [`MemoryShardStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the decoded shard documents of `dataset`, in shard id order.
    pub async fn documents(&self, dataset: &DatasetId) -> DestekResult<Option<Vec<ShardDocument>>> {
        let inner = self.inner.lock().await;
        let Some(shards) = inner.datasets.get(dataset) else {
            return Ok(None);
        };

        let documents = shards
            .iter()
            .map(|(_, bytes)| ShardDocument::decode(bytes))
            .collect::<DestekResult<Vec<_>>>()?;

        Ok(Some(documents))
    }

    /// Number of packages written so far.
    pub async fn write_count(&self) -> usize {
        self.inner.lock().await.writes
    }

    /// Returns a store serving every dataset written so far.
    pub async fn shard_store(&self) -> MemoryShardStore {
        let inner = self.inner.lock().await;
        let store = MemoryShardStore::new();

        for (dataset, shards) in &inner.datasets {
            for (shard, bytes) in shards {
                store.insert(dataset.clone(), *shard, bytes.clone()).await;
            }
        }

        store
    }
}

impl Destination for MemoryDestination {
    fn name() -> &'static str {
        "memory"
    }

    async fn write_package(&self, package: &DatasetPackage) -> DestekResult<()> {
        let shards = package
            .encode()?
            .into_iter()
            .map(|(shard, bytes)| (shard, Bytes::from(bytes)))
            .collect();

        let mut inner = self.inner.lock().await;

        info!(
            dataset_id = %package.dataset(),
            records = package.record_count(),
            "writing dataset package to memory"
        );

        inner.datasets.insert(package.dataset().clone(), shards);
        inner.writes += 1;

        Ok(())
    }
}
