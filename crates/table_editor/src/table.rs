use std::collections::{HashMap, HashSet};

use manos_block_state::{Block, BlockId, LayoutStyle, State};

use crate::cell_id::parse_cell_id;
use crate::error::{Result, TableError};

/// Column id to its position in the columns container.
pub type ColumnIndex = HashMap<BlockId, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row_number: usize,
    pub col_number: usize,
}

/// Handle on a table's scaffolding. Holds ids only, so it stays valid while
/// the state is mutated through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    block_id: BlockId,
    columns_id: BlockId,
    rows_id: BlockId,
}

impl Table {
    /// Locates the table containing `id` by climbing parents.
    pub fn new(state: &State, id: &str) -> Result<Self> {
        let mut next = state
            .pick(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        let mut seen = HashSet::new();
        while !next.is_table() {
            if next.id == state.root_id() || !seen.insert(next.id.as_str()) {
                return Err(TableError::TableRootNotFound(id.to_string()));
            }
            next = state
                .pick_parent_of(&next.id)
                .ok_or_else(|| TableError::TableRootNotFound(id.to_string()))?;
        }

        let table_id = next.id.clone();
        let [columns_id, rows_id] = next.children_ids.as_slice() else {
            return Err(TableError::InconsistentTable {
                table_id,
                reason: "table block must have exactly two children",
            });
        };

        let columns_ok = state
            .pick(columns_id)
            .and_then(Block::layout_style)
            .is_some_and(|style| style == LayoutStyle::TableColumns);
        if !columns_ok {
            return Err(TableError::InconsistentTable {
                table_id,
                reason: "columns block",
            });
        }

        let rows_ok = state
            .pick(rows_id)
            .and_then(Block::layout_style)
            .is_some_and(|style| style == LayoutStyle::TableRows);
        if !rows_ok {
            return Err(TableError::InconsistentTable {
                table_id,
                reason: "rows block",
            });
        }

        Ok(Self {
            columns_id: columns_id.clone(),
            rows_id: rows_id.clone(),
            block_id: table_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.block_id
    }

    pub fn columns_id(&self) -> &str {
        &self.columns_id
    }

    pub fn rows_id(&self) -> &str {
        &self.rows_id
    }

    pub fn columns<'a>(&self, state: &'a State) -> Result<&'a Block> {
        state
            .pick(&self.columns_id)
            .ok_or_else(|| TableError::NotFound(self.columns_id.clone()))
    }

    pub fn rows<'a>(&self, state: &'a State) -> Result<&'a Block> {
        state
            .pick(&self.rows_id)
            .ok_or_else(|| TableError::NotFound(self.rows_id.clone()))
    }

    pub fn column_ids(&self, state: &State) -> Vec<BlockId> {
        self.columns(state)
            .map(|b| b.children_ids.clone())
            .unwrap_or_default()
    }

    pub fn row_ids(&self, state: &State) -> Vec<BlockId> {
        self.rows(state)
            .map(|b| b.children_ids.clone())
            .unwrap_or_default()
    }

    pub fn make_column_index(&self, state: &State) -> ColumnIndex {
        self.column_ids(state)
            .into_iter()
            .enumerate()
            .map(|(ix, id)| (id, ix))
            .collect()
    }

    /// Visits existing cells in row-major order. Cells pointing at unknown
    /// columns or missing from the state are skipped; malformed ids fail.
    pub fn iterate<'a>(
        &self,
        state: &'a State,
        mut visit: impl FnMut(&'a Block, CellPosition) -> bool,
    ) -> Result<()> {
        let col_idx = self.make_column_index(state);

        for (row_number, row_id) in self.rows(state)?.children_ids.iter().enumerate() {
            let row = pick_row(state, row_id)?;
            for cell_id in &row.children_ids {
                let (_, col_id) = parse_cell_id(cell_id)?;
                let Some(&col_number) = col_idx.get(col_id) else {
                    continue;
                };
                let Some(cell) = state.pick(cell_id) else {
                    continue;
                };
                let position = CellPosition {
                    row_number,
                    col_number,
                };
                if !visit(cell, position) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

pub fn pick_row<'a>(state: &'a State, id: &str) -> Result<&'a Block> {
    let block = state
        .pick(id)
        .ok_or_else(|| TableError::NotFound(id.to_string()))?;
    if block.table_row().is_none() {
        return Err(TableError::wrong_kind(id, "row"));
    }
    Ok(block)
}

pub fn get_row<'a>(state: &'a mut State, id: &str) -> Result<&'a mut Block> {
    pick_row(state, id)?;
    state
        .get(id)
        .ok_or_else(|| TableError::NotFound(id.to_string()))
}

pub fn pick_column<'a>(state: &'a State, id: &str) -> Result<&'a Block> {
    let block = state
        .pick(id)
        .ok_or_else(|| TableError::NotFound(id.to_string()))?;
    if !block.is_table_column() {
        return Err(TableError::wrong_kind(id, "column"));
    }
    Ok(block)
}
