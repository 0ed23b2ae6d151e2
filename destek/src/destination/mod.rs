//! Write side: where finished dataset packages are published.

mod base;
pub mod fs;
pub mod memory;

pub use base::Destination;
