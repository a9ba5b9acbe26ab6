use std::collections::HashSet;

use manos_block_state::{Block, BlockId, Position, State, TextContent};

use crate::cell_id::parse_cell_id;
use crate::error::{Result, TableError};
use crate::table::Table;

/// Pastes `clipboard` into a table cell.
///
/// Text blocks are concatenated into the cell, one per line. Other blocks
/// cannot live in a cell: they are inserted below the table, keeping their
/// own non-text children. Returns the ids placed below the table.
pub fn paste_into_cell(
    state: &mut State,
    cell_id: &str,
    clipboard: &State,
) -> Result<Vec<BlockId>> {
    parse_cell_id(cell_id)?;
    let cell = state
        .pick(cell_id)
        .ok_or_else(|| TableError::NotFound(cell_id.to_string()))?;
    if !cell.is_text() {
        return Err(TableError::wrong_kind(cell_id, "text cell"));
    }
    let table = Table::new(state, cell_id)?;

    let mut texts: Vec<&Block> = Vec::new();
    let mut others: Vec<Block> = Vec::new();
    clipboard.iterate(|block| {
        if block.id == clipboard.root_id() {
            return true;
        }
        if block.is_text() {
            texts.push(block);
        } else {
            others.push(block.clone());
        }
        true
    })?;

    let text_ids: HashSet<&str> = texts.iter().map(|block| block.id.as_str()).collect();
    for block in &mut others {
        block.children_ids.retain(|id| !text_ids.contains(id.as_str()));
    }
    let nested: HashSet<BlockId> = others
        .iter()
        .flat_map(|block| block.children_ids.iter().cloned())
        .collect();
    let top_level: Vec<BlockId> = others
        .iter()
        .map(|block| block.id.clone())
        .filter(|id| !nested.contains(id))
        .collect();

    for block in &others {
        if state.exists(&block.id) {
            return Err(TableError::AddCollision(block.id.clone()));
        }
    }
    if !top_level.is_empty() {
        state.check_insert(table.id(), Position::Bottom)?;
    }

    let content = state
        .get(cell_id)
        .and_then(Block::text_content_mut)
        .ok_or_else(|| TableError::wrong_kind(cell_id, "text cell"))?;
    for (ix, block) in texts.iter().enumerate() {
        let Some(text) = block.text_content() else {
            continue;
        };
        if ix > 0 {
            content.merge(&TextContent::new("\n"));
        }
        content.merge(text);
    }

    for block in others {
        state.add(block);
    }
    let mut anchor = table.id().to_string();
    for id in &top_level {
        state.insert_to(&anchor, Position::Bottom, &[id])?;
        anchor = id.clone();
    }
    Ok(top_level)
}
