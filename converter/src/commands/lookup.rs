use std::fmt::Write;

use clap::Args;
use config::shared::ConverterConfig;
use destek::error::DestekError;
use destek::lookup::{LookupOutcome, LookupResolver, NamedRecord};
use destek::store::ConfiguredShardStore;
use destek::types::DatasetId;

use crate::error::ConverterResult;

#[derive(Args)]
pub(crate) struct LookupArgs {
    /// Dataset id
    dataset: String,

    /// Identity number, 10 or 11 digits
    identity: String,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

impl LookupArgs {
    pub(crate) async fn run(self, converter_config: &ConverterConfig) -> ConverterResult<()> {
        let dataset = DatasetId::new(self.dataset)?;
        let store = ConfiguredShardStore::from_config(&converter_config.lookup.store)?;
        let resolver = LookupResolver::new(store, converter_config.lookup.retry.clone());

        let outcome = resolver.resolve(&dataset, &self.identity).await?;

        if self.json {
            let rendered = serde_json::to_string_pretty(&outcome).map_err(DestekError::from)?;
            println!("{rendered}");
        } else {
            let heading = converter_config
                .dataset_label(dataset.as_str())
                .unwrap_or(dataset.as_str());
            print!("{}", render_outcome(heading, &outcome));
        }

        Ok(())
    }
}

/// Renders a lookup outcome for the terminal.
///
/// Titles and empty values are left out of the field tables. Records of a group are headed
/// by their title, or by their position when they have none.
fn render_outcome(heading: &str, outcome: &LookupOutcome) -> String {
    let mut out = String::new();

    match outcome {
        LookupOutcome::NoRecord => {
            let _ = writeln!(out, "{heading}: no record found");
        }
        LookupOutcome::Single(record) => {
            let _ = writeln!(out, "{heading}");
            if let Some(title) = record.title() {
                let _ = writeln!(out, "{title}");
            }
            render_fields(&mut out, record);
        }
        LookupOutcome::Multiple(records) => {
            let _ = writeln!(out, "{heading}: {} records", records.len());
            for (position, record) in records.iter().enumerate() {
                let title = record
                    .title()
                    .unwrap_or_else(|| format!("Record #{}", position + 1));
                let _ = writeln!(out, "\n{title}");
                render_fields(&mut out, record);
            }
        }
    }

    out
}

fn render_fields(out: &mut String, record: &NamedRecord) {
    let width = record
        .visible_fields()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or_default();

    for (name, value) in record.visible_fields() {
        let _ = writeln!(out, "  {name:<width$}  {value}");
    }
}

#[cfg(test)]
mod tests {
    use destek::types::{Record, Scalar};

    use super::*;

    fn cols() -> Vec<String> {
        ["Ad Soyad", "Tutar", "Not", "_title"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn single_record_hides_title_column_and_empty_values() {
        let outcome = LookupOutcome::from_record(
            &cols(),
            Record::Single(vec![
                Scalar::from("Al*"),
                Scalar::from("5.600,50 ₺"),
                Scalar::empty(),
                Scalar::from("Konya"),
            ]),
        );

        assert_eq!(
            render_outcome("Buzağı Desteği", &outcome),
            "Buzağı Desteği\nKonya\n  Ad Soyad  Al*\n  Tutar     5.600,50 ₺\n"
        );
    }

    #[test]
    fn group_records_are_headed_by_title_or_position() {
        let outcome = LookupOutcome::from_record(
            &cols(),
            Record::Multiple(vec![
                vec![
                    Scalar::from("Al*"),
                    Scalar::from(12_i64),
                    Scalar::empty(),
                    Scalar::from("Konya"),
                ],
                vec![
                    Scalar::from("Al*"),
                    Scalar::from(3_i64),
                    Scalar::from("ek"),
                    Scalar::empty(),
                ],
            ]),
        );

        assert_eq!(
            render_outcome("koyun", &outcome),
            "koyun: 2 records\n\
             \nKonya\n  Ad Soyad  Al*\n  Tutar     12\n\
             \nRecord #2\n  Ad Soyad  Al*\n  Tutar     3\n  Not       ek\n"
        );
    }

    #[test]
    fn missing_record_is_reported_plainly() {
        assert_eq!(
            render_outcome("koyun", &LookupOutcome::NoRecord),
            "koyun: no record found\n"
        );
    }
}
