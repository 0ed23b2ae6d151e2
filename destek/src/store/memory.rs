use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;

use crate::error::DestekResult;
use crate::package::DatasetPackage;
use crate::store::ShardStore;
use crate::types::{DatasetId, ShardId};

/// In-memory shard store for tests and development.
#[derive(Debug, Clone, Default)]
pub struct MemoryShardStore {
    documents: Arc<RwLock<HashMap<(DatasetId, ShardId), Bytes>>>,
}

impl MemoryShardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw document bytes, replacing any previous document.
    pub async fn insert(&self, dataset: DatasetId, shard: ShardId, bytes: impl Into<Bytes>) {
        let mut documents = self.documents.write().await;
        documents.insert((dataset, shard), bytes.into());
    }

    /// Stores every shard of `package`.
    pub async fn insert_package(&self, package: &DatasetPackage) -> DestekResult<()> {
        let encoded = package.encode()?;

        let mut documents = self.documents.write().await;
        for (shard, bytes) in encoded {
            documents.insert((package.dataset().clone(), shard), Bytes::from(bytes));
        }

        Ok(())
    }
}

impl ShardStore for MemoryShardStore {
    fn name() -> &'static str {
        "memory"
    }

    async fn fetch_shard(&self, dataset: &DatasetId, shard: ShardId) -> DestekResult<Option<Bytes>> {
        let documents = self.documents.read().await;

        Ok(documents.get(&(dataset.clone(), shard)).cloned())
    }
}
