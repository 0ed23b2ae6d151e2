//! Hash-key to shard routing shared by the write and read paths.
//!
//! The digest is read as one unsigned big-endian integer (the same value as parsing its hex
//! form) and reduced modulo [`SHARD_COUNT`].

use bigdecimal::num_bigint::BigUint;

use crate::types::{HashKey, SHARD_COUNT, ShardId};

/// Returns the shard a hash key belongs to.
pub fn shard_for(key: &HashKey) -> ShardId {
    let value = BigUint::from_bytes_be(key.as_bytes());
    let remainder = (value % SHARD_COUNT)
        .to_u32_digits()
        .first()
        .copied()
        .unwrap_or(0);

    ShardId::wrapping(remainder)
}
