#![allow(dead_code)]

use std::collections::HashSet;

use manos_block_state::{Block, LayoutStyle, SequenceIdGenerator, State};
use manos_table_editor::{TableEditor, make_cell_id};

/// Builds `root -> table -> (columns, rows)` with the given columns and rows.
/// `cells[i]` lists the children of `rows[i]` verbatim; ids that parse as
/// cells get one empty text block each.
pub fn mk_test_table(columns: &[&str], rows: &[&str], cells: &[&[&str]]) -> State {
    let mut blocks = vec![
        Block::other("root", "page").with_children(["table"]),
        Block::table("table").with_children(["columns", "rows"]),
        Block::layout("columns", LayoutStyle::TableColumns).with_children(columns.iter().copied()),
        Block::layout("rows", LayoutStyle::TableRows).with_children(rows.iter().copied()),
    ];
    blocks.extend(columns.iter().map(|id| Block::column(*id)));

    let mut seen = HashSet::new();
    for (ix, row_id) in rows.iter().enumerate() {
        let children = cells.get(ix).copied().unwrap_or_default();
        blocks.push(Block::row(*row_id, false).with_children(children.iter().copied()));
        for cell_id in children {
            if cell_id.contains('-') && seen.insert(*cell_id) {
                blocks.push(Block::text(*cell_id, ""));
            }
        }
    }

    State::from_blocks("root", blocks).unwrap()
}

/// A table whose every row has a cell in every column.
pub fn mk_full_table(columns: &[&str], rows: &[&str]) -> State {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|col| make_cell_id(row, col)).collect())
        .collect();
    let cells: Vec<Vec<&str>> = cells
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    let cells: Vec<&[&str]> = cells.iter().map(Vec::as_slice).collect();
    mk_test_table(columns, rows, &cells)
}

pub fn test_editor(block_ids: &[&str], row_ids: &[&str], col_ids: &[&str]) -> TableEditor {
    TableEditor::default()
        .with_block_ids(SequenceIdGenerator::from_slice(block_ids))
        .with_row_ids(SequenceIdGenerator::from_slice(row_ids))
        .with_column_ids(SequenceIdGenerator::from_slice(col_ids))
}

pub fn children(state: &State, id: &str) -> Vec<String> {
    state.pick(id).unwrap().children_ids.clone()
}

pub fn set_text(state: &mut State, id: &str, text: &str) {
    state.get(id).unwrap().text_content_mut().unwrap().text = text.to_string();
}

pub fn text_of(state: &State, id: &str) -> String {
    state.pick(id).unwrap().text_content().unwrap().text.clone()
}

pub fn set_header(state: &mut State, row_id: &str) {
    state.get(row_id).unwrap().table_row_mut().unwrap().is_header = true;
}
