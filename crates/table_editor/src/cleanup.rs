use std::collections::HashSet;

use manos_block_state::{BlockId, State};

use crate::editor::TableEditor;
use crate::table::Table;

impl TableEditor {
    /// Normalizes every table in the state and removes its empty cells from
    /// the state. Failures are logged per table and never abort the pass. Read-only
    /// objects are left alone.
    pub fn cleanup_tables(&self, state: &mut State) {
        if self.object().is_some_and(|object| object.is_read_only()) {
            return;
        }

        let mut table_ids: Vec<BlockId> = Vec::new();
        let walked = state.iterate(|block| {
            if block.is_table() {
                table_ids.push(block.id.clone());
            }
            true
        });
        if let Err(err) = walked {
            tracing::error!(error = %err, "cleanup tables: iterate");
        }

        for table_id in table_ids {
            let table = match Table::new(state, &table_id) {
                Ok(table) => table,
                Err(err) => {
                    tracing::error!(%table_id, error = %err, "cleanup tables: init table");
                    continue;
                }
            };

            if let Err(err) = table.normalize(state) {
                tracing::error!(%table_id, error = %err, "cleanup tables: normalize");
                continue;
            }

            let row_ids = table.row_ids(state);
            if row_ids.is_empty() {
                continue;
            }
            let detached: HashSet<BlockId> = state.detached_ids().map(str::to_string).collect();
            if let Err(err) = self.row_list_clean(state, &row_ids) {
                tracing::error!(%table_id, error = %err, "cleanup tables: clean rows");
            }

            let cleaned: Vec<BlockId> = state
                .detached_ids()
                .filter(|id| !detached.contains(*id))
                .map(str::to_string)
                .collect();
            for cell_id in &cleaned {
                state.remove(cell_id);
            }
            if !cleaned.is_empty() {
                tracing::debug!(
                    %table_id,
                    cells = cleaned.len(),
                    "cleanup tables: removed empty cells"
                );
            }
        }
    }
}
