use std::time::Duration;

use bytes::Bytes;
use config::shared::RetryConfig;
use rand::Rng;
use tracing::warn;

use crate::error::DestekResult;
use crate::store::ShardStore;
use crate::types::{DatasetId, ShardId};

/// Attempt bookkeeping for one shard fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    attempt_count: u32,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failed attempt.
    pub fn record_failure(&mut self) {
        self.attempt_count = self.attempt_count.saturating_add(1);
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Returns `true` once `config.max_attempts` attempts have failed.
    pub fn is_exhausted(&self, config: &RetryConfig) -> bool {
        self.attempt_count >= config.max_attempts
    }

    /// Calculates the delay before the next attempt.
    ///
    /// Exponential in the number of failures, capped at `max_delay_ms`, plus up to 30% jitter.
    pub fn calculate_backoff(&self, config: &RetryConfig) -> Duration {
        let attempt = self.attempt_count.saturating_sub(1);
        let multiplier = config.backoff_multiplier.powi(attempt as i32);
        let base_delay_ms = config.initial_delay_ms as f64 * multiplier;

        let capped_delay_ms = base_delay_ms.min(config.max_delay_ms as f64);

        let jitter_factor = rand::rng().random::<f64>() * 0.3;
        let jittered_delay_ms = capped_delay_ms * (1.0 + jitter_factor);

        Duration::from_millis(jittered_delay_ms as u64)
    }
}

/// Fetches one shard, retrying transport failures with backoff.
///
/// A missing document is returned as `Ok(None)` right away. Errors that are not retryable,
/// and the last retryable error once attempts are exhausted, are returned unchanged.
pub async fn fetch_with_retry<S>(
    store: &S,
    dataset: &DatasetId,
    shard: ShardId,
    config: &RetryConfig,
) -> DestekResult<Option<Bytes>>
where
    S: ShardStore,
{
    let mut state = RetryState::new();

    loop {
        match store.fetch_shard(dataset, shard).await {
            Ok(bytes) => return Ok(bytes),
            Err(err) => {
                state.record_failure();

                if !err.kind().is_retryable() || state.is_exhausted(config) {
                    return Err(err);
                }

                let delay = state.calculate_backoff(config);
                warn!(
                    dataset_id = %dataset,
                    shard_id = %shard,
                    store = S::name(),
                    attempt = state.attempt_count(),
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "shard fetch failed, retrying"
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}
