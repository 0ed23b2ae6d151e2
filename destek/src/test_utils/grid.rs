use crate::source::SourceFile;
use crate::types::Cell;

/// Builds a row of text cells; empty strings become [`Cell::Empty`].
pub fn text_row(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|value| {
            if value.is_empty() {
                Cell::Empty
            } else {
                Cell::from(*value)
            }
        })
        .collect()
}

/// Builds a source file from rows of text cells.
pub fn text_sheet(name: &str, rows: &[&[&str]]) -> SourceFile {
    SourceFile::new(name, rows.iter().map(|row| text_row(row)).collect())
}
