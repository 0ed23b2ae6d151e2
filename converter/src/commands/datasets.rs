use std::fmt::Write;

use clap::Args;
use config::shared::{ConverterConfig, DatasetConfig};

use crate::error::ConverterResult;

#[derive(Args)]
pub(crate) struct DatasetsArgs {}

impl DatasetsArgs {
    pub(crate) async fn run(self, converter_config: &ConverterConfig) -> ConverterResult<()> {
        let mut entries = Vec::with_capacity(converter_config.datasets.len());
        for dataset in &converter_config.datasets {
            let directory = converter_config.output_dir.join(&dataset.id);
            let written = tokio::fs::try_exists(directory).await?;
            entries.push((dataset, written));
        }

        print!("{}", render_datasets(&entries));

        Ok(())
    }
}

/// Renders one line per cataloged dataset, marking the ones present in the output directory.
fn render_datasets(entries: &[(&DatasetConfig, bool)]) -> String {
    if entries.is_empty() {
        return "no datasets configured\n".to_string();
    }

    let width = entries
        .iter()
        .map(|(dataset, _)| dataset.id.chars().count())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for (dataset, written) in entries {
        let marker = if *written { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<width$}  {}", dataset.id, dataset.label);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_ids_and_marks_written_datasets() {
        let koyun = DatasetConfig {
            id: "koyun".to_string(),
            label: "Koyun Keçi Desteği".to_string(),
        };
        let ari = DatasetConfig {
            id: "ari".to_string(),
            label: "Arıcılık Desteği".to_string(),
        };

        assert_eq!(
            render_datasets(&[(&koyun, true), (&ari, false)]),
            "* koyun  Koyun Keçi Desteği\n  ari    Arıcılık Desteği\n"
        );
        assert_eq!(render_datasets(&[]), "no datasets configured\n");
    }
}
