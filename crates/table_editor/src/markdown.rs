use std::fmt::Write as _;

use manos_block_state::State;

use crate::error::Result;
use crate::table::Table;

const MIN_CELL_WIDTH: usize = 3;

/// Renders the table as a pipe table. The first row is treated as the
/// heading and every column is right-aligned.
pub fn render_markdown(state: &State, table_id: &str) -> Result<String> {
    let table = Table::new(state, table_id)?;
    let rows = table.row_ids(state).len();
    let columns = table.column_ids(state).len();

    let mut cells = vec![vec![String::new(); columns]; rows];
    table.iterate(state, |cell, pos| {
        let text = cell
            .text_content()
            .map(|content| content.text.replace("\r\n", " ").replace('\n', " "))
            .unwrap_or_default();
        cells[pos.row_number][pos.col_number] = text.trim().to_string();
        true
    })?;

    let mut widths = vec![MIN_CELL_WIDTH; columns];
    for row in &mut cells {
        for (col, cell) in row.iter_mut().enumerate() {
            *cell = format!(" {cell} ");
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (ix, row) in cells.iter().enumerate() {
        out.push('|');
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            let _ = write!(out, "{cell:>width$}|");
        }
        out.push('\n');

        if ix == 0 {
            out.push('|');
            for width in widths.iter().copied() {
                let _ = write!(out, ":{}|", "-".repeat(width - 1));
            }
            out.push('\n');
        }
    }
    Ok(out)
}
