use config::shared::RetryConfig;
use tracing::debug;

use crate::error::DestekResult;
use crate::lookup::outcome::LookupOutcome;
use crate::lookup::retry::fetch_with_retry;
use crate::routing::shard_for;
use crate::store::ShardStore;
use crate::types::{DatasetId, IdentityNumber, ShardDocument};

/// Resolves identity numbers against the published shards of a store.
///
/// Holds no mutable state. Every call fetches exactly one shard document.
#[derive(Debug, Clone)]
pub struct LookupResolver<S> {
    store: S,
    retry: RetryConfig,
}

impl<S> LookupResolver<S>
where
    S: ShardStore,
{
    pub fn new(store: S, retry: RetryConfig) -> Self {
        Self { store, retry }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up the records stored for `input` in `dataset`.
    ///
    /// The input is validated before anything is hashed or fetched. A missing shard document
    /// resolves to [`LookupOutcome::NoRecord`], the same as a missing key.
    pub async fn resolve(&self, dataset: &DatasetId, input: &str) -> DestekResult<LookupOutcome> {
        let identity = IdentityNumber::parse(input)?;
        let key = identity.hash_key();
        let shard = shard_for(&key);

        debug!(dataset_id = %dataset, shard_id = %shard, store = S::name(), "resolving identity");

        let Some(bytes) = fetch_with_retry(&self.store, dataset, shard, &self.retry).await? else {
            debug!(dataset_id = %dataset, shard_id = %shard, "shard document not found");
            return Ok(LookupOutcome::NoRecord);
        };

        let mut document = ShardDocument::decode(&bytes)?;
        let outcome = match document.data.remove(&key) {
            Some(record) => LookupOutcome::from_record(&document.cols, record),
            None => LookupOutcome::NoRecord,
        };

        debug!(
            dataset_id = %dataset,
            shard_id = %shard,
            records = outcome.records().len(),
            "identity resolved"
        );

        Ok(outcome)
    }
}
