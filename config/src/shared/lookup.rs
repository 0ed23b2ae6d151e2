use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::{RetryConfig, ValidationError};

/// Where shard documents are read from during lookups.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShardStoreConfig {
    /// Shards laid out as `<root>/<dataset-id>/<shard-id>.json` on the local file system.
    Fs { root: PathBuf },
    /// Shards served over HTTP as `<base_url>/<dataset-id>/<shard-id>.json`.
    Http {
        base_url: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl ShardStoreConfig {
    /// Returns the request timeout for HTTP stores.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            ShardStoreConfig::Fs { .. } => None,
            ShardStoreConfig::Http { timeout_ms, .. } => Some(Duration::from_millis(*timeout_ms)),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ShardStoreConfig::Fs { root } if root.as_os_str().is_empty() => {
                Err(ValidationError::InvalidFieldValue {
                    field: "lookup.store.root".to_string(),
                    constraint: "cannot be empty".to_string(),
                })
            }
            ShardStoreConfig::Http { base_url, .. }
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) =>
            {
                Err(ValidationError::InvalidFieldValue {
                    field: "lookup.store.base_url".to_string(),
                    constraint: "must start with http:// or https://".to_string(),
                })
            }
            ShardStoreConfig::Http { timeout_ms: 0, .. } => {
                Err(ValidationError::InvalidFieldValue {
                    field: "lookup.store.timeout_ms".to_string(),
                    constraint: "must be greater than 0".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Read-path settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    pub store: ShardStoreConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl LookupConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.retry.validate()
    }
}
