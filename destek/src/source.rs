//! Source grids: the raw cells of one exported spreadsheet sheet.

use std::path::Path;

use tokio::fs;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};
use crate::types::Cell;

/// One source file, read into a grid of cells.
///
/// Rows may have different lengths; missing trailing cells are treated as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub grid: Vec<Vec<Cell>>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, grid: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// Reads a JSON array of rows, each an array of scalar cells.
    pub fn from_json_bytes(name: impl Into<String>, bytes: &[u8]) -> DestekResult<Self> {
        let rows: Vec<Vec<serde_json::Value>> = match serde_json::from_slice(bytes) {
            Ok(rows) => rows,
            Err(err) => bail!(
                ErrorKind::InvalidSourceGrid,
                "Sheet must be a JSON array of rows",
                err.to_string(),
                source: err
            ),
        };

        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(Cell::try_from).collect())
            .collect::<DestekResult<Vec<Vec<Cell>>>>()?;

        Ok(Self::new(name, grid))
    }

    /// Reads a header-less CSV sheet. Every non-empty cell is text.
    pub fn from_csv_bytes(name: impl Into<String>, bytes: &[u8]) -> DestekResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut grid = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::from(value)
                    }
                })
                .collect();
            grid.push(row);
        }

        Ok(Self::new(name, grid))
    }

    /// Name a sheet loaded from `path` is reported under: its file name, or the whole path
    /// when it has none.
    pub fn name_for(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Reads a `.json` or `.csv` sheet from disk.
    pub async fn load(path: &Path) -> DestekResult<Self> {
        let name = Self::name_for(path);

        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_bytes(name, &fs::read(path).await?),
            Some("csv") => Self::from_csv_bytes(name, &fs::read(path).await?),
            _ => bail!(
                ErrorKind::InvalidSourceGrid,
                "Unsupported sheet format, expected .json or .csv",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_json_rows_of_scalars() {
        let source = SourceFile::from_json_bytes(
            "a.json",
            br#"[["TC", "Ad", "Tutar"], [12345678901, "Ali", 5600.5], [], [null, true]]"#,
        )
        .unwrap();

        assert_eq!(source.grid.len(), 4);
        assert_eq!(source.grid[1][0].text(), "12345678901");
        assert_eq!(source.grid[1][2], Cell::Number(5600.5));
        assert!(source.grid[2].is_empty());
        assert_eq!(source.grid[3], vec![Cell::Empty, Cell::Bool(true)]);
    }

    #[test]
    fn rejects_non_grid_json() {
        let err = SourceFile::from_json_bytes("a.json", br#"{"TC": 1}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSourceGrid);

        let err = SourceFile::from_json_bytes("a.json", br#"[[["nested"]]]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSourceGrid);
    }

    #[test]
    fn reads_ragged_csv_as_text() {
        let source =
            SourceFile::from_csv_bytes("a.csv", b"TC,Ad,Tutar\n12345678901,Ali\n,,\n").unwrap();

        assert_eq!(source.grid.len(), 3);
        assert_eq!(source.grid[0][2], Cell::from("Tutar"));
        assert_eq!(
            source.grid[1],
            vec![Cell::from("12345678901"), Cell::from("Ali")]
        );
        assert!(source.grid[2].iter().all(Cell::is_blank));
    }

    #[tokio::test]
    async fn load_dispatches_on_extension() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("Koyun.CSV");
        std::fs::write(&path, "TC\n1\n").unwrap();

        let source = SourceFile::load(&path).await.unwrap();
        assert_eq!(source.name, "Koyun.CSV");
        assert_eq!(source.grid.len(), 2);

        let err = SourceFile::load(&directory.path().join("koyun.xlsx"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSourceGrid);
    }
}
