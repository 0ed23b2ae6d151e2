use config::shared::{
    ColumnRef, ColumnRolesConfig, CurrencyFormatConfig, HeaderConfig, IdentityColumnsConfig,
    IngestConfig, RetryConfig,
};

/// Parses a column letter reference, panicking on invalid input.
pub fn column(letters: &str) -> ColumnRef {
    letters.parse().unwrap()
}

/// An ingestion job with the primary identity in column `A` and no column roles.
pub fn ingest_config(dataset_id: &str) -> IngestConfig {
    IngestConfig {
        dataset_id: dataset_id.to_string(),
        header: HeaderConfig::default(),
        identity: IdentityColumnsConfig {
            primary: Some(column("A")),
            alternate: None,
        },
        columns: ColumnRolesConfig::default(),
        currency: CurrencyFormatConfig::default(),
    }
}

/// Retry settings with millisecond delays so retrying tests stay fast.
pub fn fast_retry_config(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay_ms: 1,
        max_delay_ms: 5,
        backoff_multiplier: 2.0,
    }
}
