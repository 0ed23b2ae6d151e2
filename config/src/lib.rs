//! Configuration for the subsidy ingestion and lookup tools.
//!
//! Holds the serde-backed configuration types shared by the core library and the
//! converter binary, together with the layered loader used to read them.

pub mod environment;
mod load;
pub mod shared;

pub use load::{Config, LoadConfigError, load_config, load_config_file, load_config_from};
