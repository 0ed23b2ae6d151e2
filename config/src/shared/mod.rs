//! Shared configuration types for ingestion jobs and lookups.

mod base;
mod column;
mod converter;
mod ingest;
mod lookup;
mod retry;

pub use base::ValidationError;
pub use column::{ColumnRef, ColumnRefError, ColumnRole};
pub use converter::{ConverterConfig, DatasetConfig};
pub use ingest::{
    ColumnRolesConfig, CurrencyFormatConfig, HeaderConfig, IdentityColumnsConfig, IngestConfig,
};
pub use lookup::{LookupConfig, ShardStoreConfig};
pub use retry::RetryConfig;
