//! Conversion of subsidy recipient sheets into hashed, sharded JSON datasets, and lookup of
//! individual records from the published shards.
//!
//! Identity numbers are never stored; records are keyed by the SHA-256 hex digest of the
//! identity and spread over [`types::SHARD_COUNT`] shard documents by that digest.

pub mod conversions;
pub mod destination;
pub mod error;
pub mod ingest;
pub mod lookup;
mod macros;
pub mod package;
pub mod routing;
pub mod source;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
