use std::collections::HashSet;

use config::shared::{ColumnRef, ColumnRole, CurrencyFormatConfig, IngestConfig};

use crate::bail;
use crate::conversions::{mask::mask_cell, numeric::format_currency};
use crate::error::{DestekResult, ErrorKind};
use crate::ingest::header::placeholder_name;
use crate::ingest::identity::identity_text;
use crate::types::{Cell, HashKey, Row, Scalar};

/// Name of the trailing schema column holding the title value.
pub const TITLE_COLUMN: &str = "_title";

/// Transform applied to a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    PassThrough,
    Currency,
    Mask,
}

/// A source column that appears in the output schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    /// 0-based index of the column in the source sheet.
    pub source_index: usize,
    pub name: String,
    pub transform: Transform,
}

/// How every column of a sheet is treated, computed once per source file.
///
/// Identity columns never reach the output; only their hash is stored. Ignored columns are
/// dropped. When a title column is set its value goes into the trailing [`TITLE_COLUMN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    outputs: Vec<OutputColumn>,
    primary_identity: Option<usize>,
    alternate_identity: Option<usize>,
    title: Option<usize>,
}

impl ColumnPlan {
    /// Classifies the resolved `headers` according to `config`.
    ///
    /// Fails when a configured column lies beyond the sheet width or a column carries
    /// conflicting roles.
    pub fn classify(headers: &[String], config: &IngestConfig) -> DestekResult<Self> {
        let roles = config.columns.roles()?;

        let referenced = config
            .identity
            .columns()
            .chain(roles.keys().copied())
            .filter(|column| column.index() >= headers.len());
        if let Some(column) = referenced.max() {
            bail!(
                ErrorKind::ColumnOutOfRange,
                "Configured column is outside of the sheet",
                detail = format!(
                    "column {column} requested, sheet has {} columns",
                    headers.len()
                )
            );
        }

        let mut used_names = HashSet::from([TITLE_COLUMN.to_string()]);
        let mut outputs = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let column = ColumnRef::from_index(index);
            if config.identity.contains(column) {
                continue;
            }

            let transform = match roles.get(&column).copied().unwrap_or_default() {
                ColumnRole::Ignored | ColumnRole::Title => continue,
                ColumnRole::Currency => Transform::Currency,
                ColumnRole::Masked => Transform::Mask,
                ColumnRole::None => Transform::PassThrough,
            };

            outputs.push(OutputColumn {
                source_index: index,
                name: unique_name(schema_name(header, index), &mut used_names),
                transform,
            });
        }

        Ok(Self {
            outputs,
            primary_identity: config.identity.primary.map(|column| column.index()),
            alternate_identity: config.identity.alternate.map(|column| column.index()),
            title: config.columns.title.map(|column| column.index()),
        })
    }

    /// Returns the output column list, with [`TITLE_COLUMN`] last when a title is configured.
    pub fn schema(&self) -> Vec<String> {
        let mut schema: Vec<String> = self.outputs.iter().map(|c| c.name.clone()).collect();
        if self.title.is_some() {
            schema.push(TITLE_COLUMN.to_string());
        }

        schema
    }

    pub fn outputs(&self) -> &[OutputColumn] {
        &self.outputs
    }

    /// Computes the hash key of a row.
    ///
    /// The primary identity column wins when it holds a usable value, otherwise the alternate
    /// column is tried. Returns `None` when neither is usable.
    pub fn identity_key(&self, row: &[Cell]) -> Option<HashKey> {
        self.primary_identity
            .and_then(|index| identity_text(cell_at(row, index)))
            .or_else(|| {
                self.alternate_identity
                    .and_then(|index| identity_text(cell_at(row, index)))
            })
            .map(|identity| HashKey::digest(&identity))
    }

    /// Builds the stored row: one transformed value per output column, then the title.
    ///
    /// Cells missing from short rows count as empty.
    pub fn build_row(&self, row: &[Cell], currency: &CurrencyFormatConfig) -> Row {
        let mut values: Row = self
            .outputs
            .iter()
            .map(|column| {
                let cell = cell_at(row, column.source_index);
                match column.transform {
                    Transform::PassThrough => Scalar::from(cell),
                    Transform::Currency => format_currency(cell, currency),
                    Transform::Mask => mask_cell(cell),
                }
            })
            .collect();

        if let Some(title) = self.title {
            values.push(Scalar::Text(cell_at(row, title).text().trim().to_string()));
        }

        values
    }
}

fn cell_at(row: &[Cell], index: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;

    row.get(index).unwrap_or(&EMPTY)
}

/// Strips `.` characters and surrounding whitespace from a header.
fn schema_name(header: &str, index: usize) -> String {
    let name = header.replace('.', "");
    let name = name.trim();

    if name.is_empty() {
        placeholder_name(index)
    } else {
        name.to_string()
    }
}

/// Appends ` (n)` to names already taken so the schema stays unique.
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{name} ({suffix})");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use config::shared::{
        ColumnRolesConfig, CurrencyFormatConfig, HeaderConfig, IdentityColumnsConfig,
    };

    use super::*;

    fn column(letters: &str) -> ColumnRef {
        letters.parse().unwrap()
    }

    fn config(columns: ColumnRolesConfig) -> IngestConfig {
        IngestConfig {
            dataset_id: "test".to_string(),
            header: HeaderConfig::default(),
            identity: IdentityColumnsConfig {
                primary: Some(column("B")),
                alternate: Some(column("C")),
            },
            columns,
            currency: CurrencyFormatConfig::default(),
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn identity_ignored_and_title_columns_leave_the_main_schema() {
        let plan = ColumnPlan::classify(
            &headers(&["S.No", "TC", "VKN", "Ad Soyad", "İşletme", "Tutar"]),
            &config(ColumnRolesConfig {
                currency: vec![column("F")],
                masked: vec![column("D")],
                ignored: vec![column("A")],
                title: Some(column("E")),
            }),
        )
        .unwrap();

        assert_eq!(plan.schema(), vec!["Ad Soyad", "Tutar", "_title"]);
        assert_eq!(
            plan.outputs()
                .iter()
                .map(|c| c.transform)
                .collect::<Vec<_>>(),
            vec![Transform::Mask, Transform::Currency]
        );
    }

    #[test]
    fn schema_names_drop_dots_and_stay_unique() {
        let plan = ColumnPlan::classify(
            &headers(&["Ad", "TC", "VKN", "Ad", "T.C. No", "...", "_title"]),
            &config(ColumnRolesConfig::default()),
        )
        .unwrap();

        assert_eq!(
            plan.schema(),
            vec!["Ad", "Ad (2)", "TC No", "Column5", "_title (2)"]
        );
    }

    #[test]
    fn builds_rows_with_transforms_filler_and_title() {
        let plan = ColumnPlan::classify(
            &headers(&["Ad", "TC", "VKN", "Tutar", "Köy"]),
            &config(ColumnRolesConfig {
                currency: vec![column("D")],
                masked: vec![column("A")],
                ignored: vec![],
                title: Some(column("E")),
            }),
        )
        .unwrap();

        let row = vec![
            Cell::from("Ali Veli"),
            Cell::from("12345678901"),
            Cell::Empty,
            Cell::Number(5600.5),
            Cell::from("  Merkez "),
        ];
        assert_eq!(
            plan.build_row(&row, &CurrencyFormatConfig::default()),
            vec![
                Scalar::from("Al* Ve**"),
                Scalar::from("5.600,50 ₺"),
                Scalar::from("Merkez"),
            ]
        );

        let short_row = vec![Cell::from("Ayşe")];
        assert_eq!(
            plan.build_row(&short_row, &CurrencyFormatConfig::default()),
            vec![Scalar::from("Ay**"), Scalar::empty(), Scalar::empty()]
        );
    }

    #[test]
    fn identity_falls_back_to_alternate_column() {
        let plan = ColumnPlan::classify(
            &headers(&["Ad", "TC", "VKN"]),
            &config(ColumnRolesConfig::default()),
        )
        .unwrap();

        let with_primary = vec![Cell::Empty, Cell::Number(12345678901.0), Cell::from("1234567890")];
        assert_eq!(
            plan.identity_key(&with_primary),
            Some(HashKey::digest("12345678901"))
        );

        let with_alternate = vec![Cell::Empty, Cell::from(" - "), Cell::from(" 1234567890 ")];
        assert_eq!(
            plan.identity_key(&with_alternate),
            Some(HashKey::digest("1234567890"))
        );

        let without_identity = vec![Cell::from("Ali"), Cell::from("--"), Cell::Empty];
        assert_eq!(plan.identity_key(&without_identity), None);
    }

    #[test]
    fn columns_beyond_sheet_width_are_rejected() {
        let err = ColumnPlan::classify(
            &headers(&["Ad", "TC", "VKN"]),
            &config(ColumnRolesConfig {
                currency: vec![column("H")],
                ..ColumnRolesConfig::default()
            }),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ColumnOutOfRange);
    }
}
