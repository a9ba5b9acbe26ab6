use std::collections::HashSet;

use manos_block_state::{Block, BlockId, State};

use crate::cell_id::parse_cell_id;
use crate::error::{Result, TableError};
use crate::table::{ColumnIndex, Table, get_row, pick_row};

/// Restores the structural invariants of the table containing `table_id`.
/// An unrecoverable table is reported and left untouched.
pub fn normalize_table(state: &mut State, table_id: &str) -> Result<()> {
    let table = match Table::new(state, table_id) {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!(table_id, error = %err, "table is not recoverable");
            return Err(err);
        }
    };
    table.normalize(state)
}

impl Table {
    pub fn normalize(&self, state: &mut State) -> Result<()> {
        self.normalize_columns(state)?;
        self.normalize_row_list(state)?;

        let col_idx = self.make_column_index(state);
        for row_id in self.row_ids(state) {
            self.normalize_row(state, Some(&col_idx), &row_id)?;
        }

        self.normalize_header_rows(state)
    }

    fn normalize_columns(&self, state: &mut State) -> Result<()> {
        let columns = self.columns(state)?;
        let stray: Vec<BlockId> = columns
            .children_ids
            .iter()
            .filter(|id| !state.pick(id).is_some_and(Block::is_table_column))
            .cloned()
            .collect();
        if stray.is_empty() {
            return Ok(());
        }

        for id in &stray {
            tracing::warn!(table_id = %self.id(), block_id = %id, "drop non-column from columns");
            state.unlink_from(self.columns_id(), id);
        }
        Ok(())
    }

    fn normalize_row_list(&self, state: &mut State) -> Result<()> {
        for row_id in self.row_ids(state) {
            match state.pick(&row_id) {
                None => {
                    tracing::warn!(table_id = %self.id(), %row_id, "recreate missing row");
                    if !state.add(Block::row(row_id.clone(), false)) {
                        return Err(TableError::AddCollision(row_id));
                    }
                }
                Some(block) if block.table_row().is_none() => {
                    tracing::warn!(table_id = %self.id(), %row_id, "drop non-row from rows");
                    state.unlink_from(self.rows_id(), &row_id);
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Drops malformed cells from a row and orders the rest by column
    /// position. The row's children are rewritten only if something changed.
    pub fn normalize_row(
        &self,
        state: &mut State,
        col_idx: Option<&ColumnIndex>,
        row_id: &str,
    ) -> Result<()> {
        let owned;
        let col_idx = match col_idx {
            Some(col_idx) => col_idx,
            None => {
                owned = self.make_column_index(state);
                &owned
            }
        };

        let row = pick_row(state, row_id)?;
        let mut seen = HashSet::new();
        let mut kept: Vec<(usize, BlockId)> = Vec::with_capacity(row.children_ids.len());
        let mut discarded: Vec<BlockId> = Vec::new();
        let mut touched = false;

        for cell_id in &row.children_ids {
            let reason = match parse_cell_id(cell_id) {
                Err(_) => Some("invalid cell id"),
                Ok((cell_row, _)) if cell_row != row_id => Some("cell of another row"),
                Ok((_, col_id)) => match col_idx.get(col_id) {
                    None => Some("column is not found"),
                    Some(&ix) => {
                        if seen.insert(cell_id.as_str()) {
                            kept.push((ix, cell_id.clone()));
                        } else {
                            touched = true;
                        }
                        None
                    }
                },
            };
            if let Some(reason) = reason {
                tracing::warn!(row_id, %cell_id, reason, "discard cell");
                discarded.push(cell_id.clone());
            }
        }

        if !kept.is_sorted_by_key(|(ix, _)| *ix) {
            kept.sort_by_key(|(ix, _)| *ix);
            touched = true;
        }
        if !touched && discarded.is_empty() {
            return Ok(());
        }

        for cell_id in &discarded {
            state.unlink_from(row_id, cell_id);
        }
        let row = get_row(state, row_id)?;
        row.children_ids = kept.into_iter().map(|(_, id)| id).collect();
        Ok(())
    }

    /// Moves header rows in front of regular rows, keeping the relative order
    /// inside each group.
    pub fn normalize_header_rows(&self, state: &mut State) -> Result<()> {
        let row_ids = self.row_ids(state);
        let (headers, regular): (Vec<BlockId>, Vec<BlockId>) =
            row_ids.iter().cloned().partition(|id| {
                state
                    .pick(id)
                    .and_then(Block::table_row)
                    .is_some_and(|row| row.is_header)
            });

        let ordered: Vec<BlockId> = headers.into_iter().chain(regular).collect();
        if ordered == row_ids {
            return Ok(());
        }
        let rows = state
            .get(self.rows_id())
            .ok_or_else(|| TableError::NotFound(self.rows_id().to_string()))?;
        rows.children_ids = ordered;
        Ok(())
    }
}
