use std::future::Future;

use bytes::Bytes;

use crate::error::DestekResult;
use crate::types::{DatasetId, ShardId};

/// Read access to published shard documents.
pub trait ShardStore {
    /// Returns the name of the store.
    fn name() -> &'static str;

    /// Fetches the raw bytes of one shard document.
    ///
    /// Returns `Ok(None)` when the document does not exist. Transport failures are returned
    /// as [`crate::error::ErrorKind::ShardFetchFailed`] so callers can retry them.
    fn fetch_shard(
        &self,
        dataset: &DatasetId,
        shard: ShardId,
    ) -> impl Future<Output = DestekResult<Option<Bytes>>> + Send;
}
