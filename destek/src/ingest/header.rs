use config::shared::HeaderConfig;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};
use crate::types::Cell;

/// Returns the synthetic name used for a column without header text.
pub fn placeholder_name(index: usize) -> String {
    format!("Column{index}")
}

/// Resolves the header row of `grid` into one name per grid column.
///
/// With `merge_parent` set, the row above the header row supplies parent labels: a non-empty
/// child is prefixed with its parent unless it already starts with it, and an empty child
/// falls back to its own parent cell. With `fill_forward_parent` also set, a parent label
/// carries rightward over blank parent cells, the way merged cells behave. Merging is skipped
/// when the header is the first row. Columns left without text get [`placeholder_name`].
pub fn resolve_headers(grid: &[Vec<Cell>], header: &HeaderConfig) -> DestekResult<Vec<String>> {
    let Some(header_index) = header_row_index(grid, header)? else {
        bail!(ErrorKind::HeaderRowOutOfRange, "Header row number must be 1 or greater");
    };

    let width = grid_width(grid);
    let child_row = &grid[header_index];
    let parent_row = (header.merge_parent && header_index > 0).then(|| &grid[header_index - 1]);

    let mut headers = Vec::with_capacity(width);
    let mut carried_parent = String::new();

    for index in 0..width {
        let child = cell_text(child_row, index);

        let Some(parent_row) = parent_row else {
            headers.push(non_empty_or_placeholder(child, index));
            continue;
        };

        let own_parent = cell_text(parent_row, index);
        if !own_parent.is_empty() {
            carried_parent = own_parent.clone();
        }
        let parent = if header.fill_forward_parent {
            carried_parent.as_str()
        } else {
            own_parent.as_str()
        };

        let name = if child.is_empty() {
            non_empty_or_placeholder(own_parent.clone(), index)
        } else if !parent.is_empty() && !child.starts_with(parent) {
            format!("{parent} {child}")
        } else {
            child
        };

        headers.push(name);
    }

    Ok(headers)
}

/// Returns the 0-based index of the header row, validating that it lies inside the grid.
///
/// Returns `Ok(None)` for a header row number of zero.
pub fn header_row_index(grid: &[Vec<Cell>], header: &HeaderConfig) -> DestekResult<Option<usize>> {
    let Some(index) = (header.row as usize).checked_sub(1) else {
        return Ok(None);
    };

    if index >= grid.len() {
        bail!(
            ErrorKind::HeaderRowOutOfRange,
            "Header row outside of sheet",
            detail = format!("header row {} requested, sheet has {} rows", header.row, grid.len())
        );
    }

    Ok(Some(index))
}

/// Number of columns of the widest row.
pub fn grid_width(grid: &[Vec<Cell>]) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}

fn cell_text(row: &[Cell], index: usize) -> String {
    row.get(index)
        .map(|cell| cell.text().trim().to_string())
        .unwrap_or_default()
}

fn non_empty_or_placeholder(text: String, index: usize) -> String {
    if text.is_empty() {
        placeholder_name(index)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<Cell> {
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

    fn header(row: u32, merge_parent: bool, fill_forward_parent: bool) -> HeaderConfig {
        HeaderConfig {
            row,
            merge_parent,
            fill_forward_parent,
        }
    }

    #[test]
    fn single_header_row_uses_trimmed_text_and_placeholders() {
        let grid = vec![row(&[" Ad Soyad ", "", "Tutar"]), row(&["x", "y", "z", "w"])];

        let headers = resolve_headers(&grid, &header(1, false, false)).unwrap();

        assert_eq!(headers, vec!["Ad Soyad", "Column1", "Tutar", "Column3"]);
    }

    #[test]
    fn merges_parent_labels_from_own_cells() {
        let grid = vec![row(&["Destek", "", "Destek"]), row(&["Sayı", "Tutar", ""])];

        let headers = resolve_headers(&grid, &header(2, true, false)).unwrap();

        assert_eq!(headers, vec!["Destek Sayı", "Tutar", "Destek"]);
    }

    #[test]
    fn fill_forward_carries_parent_over_blank_cells() {
        let grid = vec![
            row(&["Buzağı", "", "", "Oğlak"]),
            row(&["Sayı", "Tutar", "", "Sayı"]),
        ];

        let headers = resolve_headers(&grid, &header(2, true, true)).unwrap();

        assert_eq!(
            headers,
            vec!["Buzağı Sayı", "Buzağı Tutar", "Column2", "Oğlak Sayı"]
        );
    }

    #[test]
    fn child_already_prefixed_is_not_doubled() {
        let grid = vec![row(&["Destek"]), row(&["Destek Tutarı"])];

        let headers = resolve_headers(&grid, &header(2, true, false)).unwrap();

        assert_eq!(headers, vec!["Destek Tutarı"]);
    }

    #[test]
    fn merge_is_skipped_for_first_row_header() {
        let grid = vec![row(&["Sayı", ""])];

        let headers = resolve_headers(&grid, &header(1, true, true)).unwrap();

        assert_eq!(headers, vec!["Sayı", "Column1"]);
    }

    #[test]
    fn numeric_header_cells_use_their_text() {
        let grid = vec![vec![Cell::Number(2025.0), Cell::Bool(true)]];

        let headers = resolve_headers(&grid, &header(1, false, false)).unwrap();

        assert_eq!(headers, vec!["2025", "true"]);
    }

    #[test]
    fn header_row_outside_sheet_is_an_error() {
        let grid = vec![row(&["A"])];

        let err = resolve_headers(&grid, &header(3, false, false)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HeaderRowOutOfRange);
    }
}
