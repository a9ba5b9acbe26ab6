use manos_block_state::{Block, BlockId, Content, LayoutStyle, Position, State};

use crate::cell_id::is_table_cell;
use crate::error::{Result, TableError};
use crate::table::Table;

/// Vets a move of `block_ids` to `target_id`/`position` against table
/// structure and returns the target the move should really use.
///
/// Targets outside any table pass through unchanged. Blocks that make up a
/// table (its layouts, rows, columns and cells, or the table itself) cannot
/// be moved. A drop anywhere inside a table, or into the table block, lands
/// below the table instead.
pub fn check_table_blocks_move(
    state: &State,
    target_id: &str,
    position: Position,
    block_ids: &[BlockId],
) -> Result<(BlockId, Position)> {
    let table = match Table::new(state, target_id) {
        Ok(table) => table,
        Err(TableError::NotFound(_) | TableError::TableRootNotFound(_)) => {
            return Ok((target_id.to_string(), position));
        }
        Err(err) => return Err(err),
    };

    if !matches!(position, Position::Top | Position::Bottom | Position::Inner) {
        return Err(TableError::InvalidPosition(position));
    }

    for id in block_ids {
        if is_table_part(state, &table, id) {
            return Err(TableError::MoveForbidden(id.clone()));
        }
    }

    if target_id == table.id() && position != Position::Inner {
        return Ok((target_id.to_string(), position));
    }
    Ok((table.id().to_string(), Position::Bottom))
}

fn is_table_part(state: &State, table: &Table, id: &str) -> bool {
    if !state.is_descendant_of(id, table.id()) {
        return false;
    }
    let Some(block) = state.pick(id) else {
        return false;
    };

    let structural = match &block.content {
        Content::Table | Content::TableRow(_) | Content::TableColumn => true,
        Content::Layout(layout) => {
            matches!(layout.style, LayoutStyle::TableRows | LayoutStyle::TableColumns)
        }
        _ => false,
    };

    structural
        || is_table_cell(id)
        || state
            .pick_parent_of(id)
            .and_then(Block::table_row)
            .is_some()
}
