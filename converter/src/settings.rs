use std::path::Path;

use config::shared::{ConverterConfig, IngestConfig};
use config::{load_config, load_config_file, load_config_from};

use crate::error::{ConverterError, ConverterResult};

/// Loads and validates the converter configuration.
///
/// Reads the `configuration` directory of the working directory unless `directory` is given.
pub fn load_converter_config(directory: Option<&Path>) -> ConverterResult<ConverterConfig> {
    let config = match directory {
        Some(directory) => load_config_from::<ConverterConfig>(directory),
        None => load_config::<ConverterConfig>(),
    }
    .map_err(ConverterError::config)?;
    config.validate().map_err(ConverterError::config)?;

    Ok(config)
}

/// Loads an ingestion job file.
///
/// Validation happens once the dataset id is settled, when the pipeline is created.
pub fn load_ingest_job(path: &Path) -> ConverterResult<IngestConfig> {
    load_config_file::<IngestConfig>(path).map_err(ConverterError::config)
}
