use std::fmt;

/// Number of shards every dataset is split into.
///
/// Writer and reader must agree on this value; changing it breaks every existing dataset.
pub const SHARD_COUNT: u32 = 100;

/// Index of one of the [`SHARD_COUNT`] shards of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShardId(u32);

impl ShardId {
    /// Returns the shard id for `index`, or `None` if it is out of range.
    pub fn new(index: u32) -> Option<Self> {
        (index < SHARD_COUNT).then_some(Self(index))
    }

    /// Returns the shard id for `index` reduced modulo [`SHARD_COUNT`].
    pub(crate) fn wrapping(index: u32) -> Self {
        Self(index % SHARD_COUNT)
    }

    /// Iterates over every shard id in ascending order.
    pub fn all() -> impl Iterator<Item = ShardId> {
        (0..SHARD_COUNT).map(ShardId)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// File name of the shard document, not zero-padded.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
