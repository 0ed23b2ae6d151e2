//! Read side storage of published shard documents.

mod base;
pub mod fs;
pub mod http;
pub mod memory;

pub use base::ShardStore;

use std::time::Duration;

use bytes::Bytes;
use config::shared::ShardStoreConfig;

use crate::error::DestekResult;
use crate::store::fs::FsShardStore;
use crate::store::http::HttpShardStore;
use crate::types::{DatasetId, ShardId};

/// A shard store selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredShardStore {
    Fs(FsShardStore),
    Http(HttpShardStore),
}

impl ConfiguredShardStore {
    pub fn from_config(config: &ShardStoreConfig) -> DestekResult<Self> {
        let store = match config {
            ShardStoreConfig::Fs { root } => ConfiguredShardStore::Fs(FsShardStore::new(root)),
            ShardStoreConfig::Http {
                base_url,
                timeout_ms,
            } => ConfiguredShardStore::Http(HttpShardStore::new(
                base_url,
                Duration::from_millis(*timeout_ms),
            )?),
        };

        Ok(store)
    }
}

impl ShardStore for ConfiguredShardStore {
    fn name() -> &'static str {
        "configured"
    }

    async fn fetch_shard(&self, dataset: &DatasetId, shard: ShardId) -> DestekResult<Option<Bytes>> {
        match self {
            ConfiguredShardStore::Fs(store) => store.fetch_shard(dataset, shard).await,
            ConfiguredShardStore::Http(store) => store.fetch_shard(dataset, shard).await,
        }
    }
}
