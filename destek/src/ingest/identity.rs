use crate::types::Cell;

/// Normalized values this short are stray punctuation or placeholders, not identity numbers.
const MIN_IDENTITY_LENGTH: usize = 3;

/// Normalizes an identity cell for hashing.
///
/// Returns the trimmed cell text, or `None` when it is shorter than three characters or the
/// cell is a boolean. No digit or length check happens here; sheets carry whatever the
/// source system exported and the hash is taken as is.
pub fn identity_text(cell: &Cell) -> Option<String> {
    if matches!(cell, Cell::Bool(_)) {
        return None;
    }

    let text = cell.text();
    let trimmed = text.trim();

    (trimmed.chars().count() >= MIN_IDENTITY_LENGTH).then(|| trimmed.to_string())
}
