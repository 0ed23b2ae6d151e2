use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};
use crate::package::shard_document_path;
use crate::store::ShardStore;
use crate::types::{DatasetId, ShardId};

/// Fetches shard documents from a static HTTP server at `<base-url>/<dataset-id>/<shard-id>.json`.
#[derive(Debug, Clone)]
pub struct HttpShardStore {
    client: Client,
    base_url: String,
}

impl HttpShardStore {
    /// Creates a store whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DestekResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Returns the URL of one shard document.
    pub fn shard_url(&self, dataset: &DatasetId, shard: ShardId) -> String {
        format!("{}/{}", self.base_url, shard_document_path(dataset, shard))
    }
}

impl ShardStore for HttpShardStore {
    fn name() -> &'static str {
        "http"
    }

    async fn fetch_shard(&self, dataset: &DatasetId, shard: ShardId) -> DestekResult<Option<Bytes>> {
        let url = self.shard_url(dataset, shard);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        debug!(dataset_id = %dataset, shard_id = %shard, %status, "shard response received");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            bail!(
                ErrorKind::ShardFetchFailed,
                "Shard server returned an error status",
                format!("{url} responded with {status}")
            );
        }

        Ok(Some(response.bytes().await?))
    }
}
