use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use tokio::fs;

use crate::destek_error;
use crate::error::{DestekResult, ErrorKind};
use crate::package::shard_document_path;
use crate::store::ShardStore;
use crate::types::{DatasetId, ShardId};

/// Reads shard documents laid out as `<root>/<dataset-id>/<shard-id>.json`.
#[derive(Debug, Clone)]
pub struct FsShardStore {
    root: PathBuf,
}

impl FsShardStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ShardStore for FsShardStore {
    fn name() -> &'static str {
        "fs"
    }

    async fn fetch_shard(&self, dataset: &DatasetId, shard: ShardId) -> DestekResult<Option<Bytes>> {
        let path = self.root.join(shard_document_path(dataset, shard));

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(destek_error!(
                ErrorKind::ShardFetchFailed,
                "Shard document could not be read",
                path.display(),
                source: err
            )),
        }
    }
}
