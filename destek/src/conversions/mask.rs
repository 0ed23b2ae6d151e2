use crate::types::{Cell, Scalar};

/// Character replacing the hidden part of a masked name.
const MASK_CHAR: char = '*';

/// Number of leading characters kept visible in each token.
const VISIBLE_PREFIX: usize = 2;

/// Redacts a personal name.
///
/// Each whitespace-separated token of three or more characters keeps its first two characters,
/// the rest is replaced by one mask character per hidden character. Shorter tokens are kept.
/// Tokens are re-joined with single spaces.
pub fn mask_name(name: &str) -> String {
    name.split_whitespace()
        .map(mask_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn mask_token(token: &str) -> String {
    let length = token.chars().count();
    if length <= VISIBLE_PREFIX {
        return token.to_string();
    }

    token
        .chars()
        .take(VISIBLE_PREFIX)
        .chain(std::iter::repeat_n(MASK_CHAR, length - VISIBLE_PREFIX))
        .collect()
}

/// Renders a masked column cell. Empty cells stay empty.
pub fn mask_cell(cell: &Cell) -> Scalar {
    match cell {
        Cell::Empty => Scalar::empty(),
        other => Scalar::Text(mask_name(&other.text())),
    }
}
