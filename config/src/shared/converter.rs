use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::load::Config;
use crate::shared::{LookupConfig, ValidationError};

/// Catalog entry describing one published dataset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Dataset id, the path segment shard documents live under.
    pub id: String,
    /// Human-readable name shown next to lookup results.
    pub label: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Settings of the converter binary, loaded from the `configuration` directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Root directory ingestion writes dataset directories into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Read-path settings.
    pub lookup: LookupConfig,
    /// Known datasets.
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

impl ConverterConfig {
    /// Returns the label of the dataset with the given id, if it is cataloged.
    pub fn dataset_label(&self, id: &str) -> Option<&str> {
        self.datasets
            .iter()
            .find(|dataset| dataset.id == id)
            .map(|dataset| dataset.label.as_str())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lookup.validate()?;

        for (position, dataset) in self.datasets.iter().enumerate() {
            if dataset.id.trim().is_empty() {
                return Err(ValidationError::InvalidFieldValue {
                    field: format!("datasets[{position}].id"),
                    constraint: "cannot be empty".to_string(),
                });
            }

            if self.datasets[..position]
                .iter()
                .any(|other| other.id == dataset.id)
            {
                return Err(ValidationError::InvalidFieldValue {
                    field: format!("datasets[{position}].id"),
                    constraint: format!("`{}` is listed more than once", dataset.id),
                });
            }
        }

        Ok(())
    }
}

impl Config for ConverterConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ShardStoreConfig;

    fn config_with(datasets: Vec<DatasetConfig>) -> ConverterConfig {
        ConverterConfig {
            output_dir: default_output_dir(),
            lookup: LookupConfig {
                store: ShardStoreConfig::Fs {
                    root: PathBuf::from("data"),
                },
                retry: Default::default(),
            },
            datasets,
        }
    }

    #[test]
    fn rejects_duplicate_dataset_ids() {
        let dataset = DatasetConfig {
            id: "buzagi2025_1".to_string(),
            label: "Buzağı".to_string(),
        };
        let config = config_with(vec![dataset.clone(), dataset]);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("datasets[1].id"));
    }

    #[test]
    fn unknown_dataset_has_no_label() {
        let config = config_with(vec![]);

        assert_eq!(config.dataset_label("missing"), None);
        config.validate().unwrap();
    }
}
