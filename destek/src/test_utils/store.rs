use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use bytes::Bytes;

use crate::destek_error;
use crate::error::{DestekResult, ErrorKind};
use crate::store::ShardStore;
use crate::types::{DatasetId, ShardId};

/// Wraps a store and fails its first `failures` fetches with a retryable error.
#[derive(Debug, Clone)]
pub struct FlakyShardStore<S> {
    inner: S,
    failures: u32,
    calls: Arc<AtomicU32>,
}

impl<S> FlakyShardStore<S> {
    pub fn new(inner: S, failures: u32) -> Self {
        Self {
            inner,
            failures,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of fetches attempted so far, failed ones included.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S> ShardStore for FlakyShardStore<S>
where
    S: ShardStore + Sync,
{
    fn name() -> &'static str {
        "flaky"
    }

    async fn fetch_shard(&self, dataset: &DatasetId, shard: ShardId) -> DestekResult<Option<Bytes>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(destek_error!(
                ErrorKind::ShardFetchFailed,
                "Injected shard fetch failure",
                format!("call {}", call + 1)
            ));
        }

        self.inner.fetch_shard(dataset, shard).await
    }
}
