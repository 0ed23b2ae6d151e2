//! Common types shared by the ingestion and lookup paths.

mod cell;
mod dataset;
mod identity;
mod record;
mod shard;
mod value;

pub use cell::*;
pub use dataset::*;
pub use identity::*;
pub use record::*;
pub use shard::*;
pub use value::*;
