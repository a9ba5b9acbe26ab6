use crate::error::{Result, TableError};

pub const CELL_ID_SEPARATOR: char = '-';

pub fn make_cell_id(row_id: &str, col_id: &str) -> String {
    format!("{row_id}{CELL_ID_SEPARATOR}{col_id}")
}

/// Splits a cell id on its first separator. The remainder is the column id,
/// so column ids may themselves contain the separator.
pub fn parse_cell_id(id: &str) -> Result<(&str, &str)> {
    match id.split_once(CELL_ID_SEPARATOR) {
        Some((row_id, col_id)) if !row_id.is_empty() && !col_id.is_empty() => Ok((row_id, col_id)),
        _ => Err(TableError::InvalidCellId(id.to_string())),
    }
}

/// Strict membership test: exactly one separator, neither first nor last.
pub fn is_table_cell(id: &str) -> bool {
    let mut parts = id.split(CELL_ID_SEPARATOR);
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(row), Some(col), None) if !row.is_empty() && !col.is_empty()
    )
}

