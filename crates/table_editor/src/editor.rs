use std::sync::Arc;

use manos_block_state::{
    Block, BlockId, Content, IdGenerator, LayoutStyle, ObjectIdGenerator, Position, State,
    StateError, TextContent,
};

use crate::cell_id::{make_cell_id, parse_cell_id};
use crate::collate::Collator;
use crate::config::TableEditorConfig;
use crate::error::{Result, TableError};
use crate::object::ObjectCapabilities;
use crate::request::{
    ColumnCreateRequest, ColumnDuplicateRequest, ColumnMoveRequest, ExpandRequest,
    RowCreateRequest, RowDuplicateRequest, RowMoveRequest, RowSetHeaderRequest, SortOrder,
    SortRequest, TableCreateRequest, TargetRequest,
};
use crate::table::{Table, get_row, pick_column, pick_row};

/// Mutating operations over tables. Every operation either fails or leaves
/// the tables it touched normalized.
pub struct TableEditor {
    config: TableEditorConfig,
    object: Option<Arc<dyn ObjectCapabilities>>,
    generate_block_id: Arc<dyn IdGenerator>,
    generate_row_id: Arc<dyn IdGenerator>,
    generate_col_id: Arc<dyn IdGenerator>,
}

impl Default for TableEditor {
    fn default() -> Self {
        Self::new(TableEditorConfig::default())
    }
}

impl TableEditor {
    pub fn new(config: TableEditorConfig) -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::new(ObjectIdGenerator::new());
        Self {
            config: config.with_defaults(),
            object: None,
            generate_block_id: ids.clone(),
            generate_row_id: ids.clone(),
            generate_col_id: ids,
        }
    }

    pub fn with_object(mut self, object: Arc<dyn ObjectCapabilities>) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_block_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.generate_block_id = Arc::new(ids);
        self
    }

    pub fn with_row_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.generate_row_id = Arc::new(ids);
        self
    }

    pub fn with_column_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.generate_col_id = Arc::new(ids);
        self
    }

    pub fn config(&self) -> &TableEditorConfig {
        &self.config
    }

    pub(crate) fn object(&self) -> Option<&dyn ObjectCapabilities> {
        self.object.as_deref()
    }

    pub fn table_create(&self, state: &mut State, req: &TableCreateRequest) -> Result<BlockId> {
        if self.object().is_some_and(|object| object.blocks_restricted()) {
            return Err(TableError::Restricted);
        }
        match req.position {
            Position::Top | Position::Bottom | Position::Inner => {}
            other => return Err(TableError::InvalidPosition(other)),
        }
        if req.with_header_row && req.rows == 0 {
            return Err(TableError::Empty("header row"));
        }
        state.check_insert(&req.target_id, req.position)?;

        let mut column_ids = Vec::with_capacity(req.columns as usize);
        for _ in 0..req.columns {
            column_ids.push(self.add_column_header(state)?);
        }
        let columns = add_block(
            state,
            Block::layout(self.generate_block_id.next_id(), LayoutStyle::TableColumns)
                .with_children(column_ids),
        )?;

        let mut row_ids = Vec::with_capacity(req.rows as usize);
        for _ in 0..req.rows {
            row_ids.push(self.add_row(state)?);
        }
        let rows = add_block(
            state,
            Block::layout(self.generate_block_id.next_id(), LayoutStyle::TableRows)
                .with_children(row_ids.iter().cloned()),
        )?;

        let table_id = add_block(
            state,
            Block::table(self.generate_block_id.next_id()).with_children([columns, rows]),
        )?;
        state.insert_to(&req.target_id, req.position, &[&table_id])?;
        tracing::debug!(%table_id, columns = req.columns, rows = req.rows, "table created");

        if !req.with_header_row {
            return Ok(table_id);
        }
        let Some(header_id) = row_ids.first() else {
            return Err(TableError::Empty("header row"));
        };

        self.row_set_header(
            state,
            &RowSetHeaderRequest {
                target_id: header_id.clone(),
                is_header: true,
            },
        )?;
        self.row_list_fill(state, std::slice::from_ref(header_id))?;

        let cell_ids = pick_row(state, header_id)?.children_ids.clone();
        for cell_id in cell_ids {
            let cell = state
                .get(&cell_id)
                .ok_or_else(|| TableError::NotFound(cell_id.clone()))?;
            cell.background_color = self.config.header_background.clone();
        }

        Ok(table_id)
    }

    /// Builds a table sized to `grid` and fills it cell by cell.
    pub fn table_create_from_grid<S: AsRef<str>>(
        &self,
        state: &mut State,
        target_id: &str,
        position: Position,
        grid: &[Vec<S>],
        with_header_row: bool,
    ) -> Result<BlockId> {
        let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
        let table_id = self.table_create(
            state,
            &TableCreateRequest::new(target_id, position)
                .size(columns as u32, grid.len() as u32)
                .with_header_row(with_header_row),
        )?;

        let table = Table::new(state, &table_id)?;
        let column_ids = table.column_ids(state);
        let row_ids = table.row_ids(state);
        for (row_id, cells) in row_ids.iter().zip(grid) {
            for (col_id, text) in column_ids.iter().zip(cells) {
                let text = text.as_ref();
                let cell_id = make_cell_id(row_id, col_id);
                if let Some(content) = state.get(&cell_id).and_then(Block::text_content_mut) {
                    content.text = text.to_string();
                    continue;
                }
                if text.is_empty() {
                    continue;
                }
                self.cell_create(state, row_id, col_id, &Block::text("", text))?;
            }
        }
        Ok(table_id)
    }

    /// Appends `columns` columns on the right and `rows` rows at the bottom.
    pub fn expand(&self, state: &mut State, req: &ExpandRequest) -> Result<()> {
        let table = Table::new(state, &req.target_id)?;

        for _ in 0..req.columns {
            self.column_create(
                state,
                &TargetRequest::new(req.target_id.clone(), Position::Inner),
            )?;
        }

        for _ in 0..req.rows {
            let target = match table.row_ids(state).last() {
                Some(last) => TargetRequest::new(last.clone(), Position::Bottom),
                None => TargetRequest::new(table.id(), Position::Inner),
            };
            self.row_create(state, &target)?;
        }
        Ok(())
    }

    pub fn cell_create(
        &self,
        state: &mut State,
        row_id: &str,
        col_id: &str,
        proto: &Block,
    ) -> Result<BlockId> {
        let table = Table::new(state, row_id)?;
        pick_row(state, row_id)?;
        pick_column(state, col_id)?;
        ensure_same_table(state, &table, col_id)?;

        let cell_id = make_cell_id(row_id, col_id);
        if pick_row(state, row_id)?.children_ids.contains(&cell_id) {
            return Err(TableError::AddCollision(cell_id));
        }
        let cell_id = provide_cell(state, row_id, col_id)?;
        if let Some(cell) = state.get(&cell_id) {
            cell.content = proto.content.clone();
        }
        state.insert_to(row_id, Position::Inner, &[&cell_id])?;

        table.normalize_row(state, None, row_id)?;
        Ok(cell_id)
    }

    pub fn row_create(&self, state: &mut State, req: &RowCreateRequest) -> Result<BlockId> {
        let table = Table::new(state, &req.target_id)?;
        let target_id = match req.position {
            Position::Top | Position::Bottom => {
                pick_row(state, &req.target_id)?;
                req.target_id.clone()
            }
            Position::Inner => table.rows_id().to_string(),
            other => return Err(TableError::InvalidPosition(other)),
        };
        state.check_insert(&target_id, req.position)?;

        let row_id = self.add_row(state)?;
        state.insert_to(&target_id, req.position, &[&row_id])?;

        table.normalize_header_rows(state)?;
        Ok(row_id)
    }

    /// Moves a row next to another row of the same table. Header rows stay
    /// in front of regular rows.
    pub fn row_move(&self, state: &mut State, req: &RowMoveRequest) -> Result<()> {
        if !req.position.is_sibling() {
            return Err(TableError::InvalidPosition(req.position));
        }
        pick_row(state, &req.target_id)?;
        pick_row(state, &req.drop_target_id)?;
        let table = Table::new(state, &req.target_id)?;
        ensure_same_table(state, &table, &req.drop_target_id)?;

        if req.target_id == req.drop_target_id {
            return Ok(());
        }

        state.check_insert(&req.drop_target_id, req.position)?;
        if !state.unlink_from(table.rows_id(), &req.target_id) {
            return Err(StateError::NoParent(req.target_id.clone()).into());
        }
        state.insert_to(&req.drop_target_id, req.position, &[&req.target_id])?;

        table.normalize_header_rows(state)
    }

    /// Unlinks the row. Its cells stay in the state, detached.
    pub fn row_delete(&self, state: &mut State, target_id: &str) -> Result<()> {
        pick_row(state, target_id)?;
        if !state.unlink(target_id) {
            return Err(StateError::NoParent(target_id.to_string()).into());
        }
        Ok(())
    }

    pub fn row_duplicate(&self, state: &mut State, req: &RowDuplicateRequest) -> Result<BlockId> {
        if !req.position.is_sibling() {
            return Err(TableError::InvalidPosition(req.position));
        }
        let src_row = pick_row(state, &req.block_id)?.clone();
        pick_row(state, &req.target_id)?;
        let table = Table::new(state, &req.target_id)?;
        ensure_same_table(state, &table, &req.block_id)?;

        let mut cells = Vec::with_capacity(src_row.children_ids.len());
        for cell_id in &src_row.children_ids {
            let (_, col_id) = parse_cell_id(cell_id)?;
            let cell = state
                .pick(cell_id)
                .ok_or_else(|| TableError::NotFound(cell_id.clone()))?;
            cells.push((col_id.to_string(), cell.clone()));
        }

        let new_row_id = self.generate_row_id.next_id();
        let mut new_row = src_row;
        new_row.id = new_row_id.clone();
        new_row.children_ids.clear();
        add_block(state, new_row)?;
        state.insert_to(&req.target_id, req.position, &[&new_row_id])?;

        let mut new_cell_ids = Vec::with_capacity(cells.len());
        for (col_id, mut cell) in cells {
            cell.id = make_cell_id(&new_row_id, &col_id);
            new_cell_ids.push(add_block(state, cell)?);
        }
        get_row(state, &new_row_id)?.children_ids = new_cell_ids;

        table.normalize_header_rows(state)?;
        Ok(new_row_id)
    }

    /// Gives every listed row a cell for each column, in column order.
    pub fn row_list_fill(&self, state: &mut State, block_ids: &[BlockId]) -> Result<()> {
        let Some(first) = block_ids.first() else {
            return Err(TableError::Empty("row"));
        };
        let table = Table::new(state, first)?;
        let columns = table.column_ids(state);
        for row_id in block_ids {
            pick_row(state, row_id)?;
        }

        for row_id in block_ids {
            let mut cell_ids = Vec::with_capacity(columns.len());
            for col_id in &columns {
                let cell_id = provide_cell(state, row_id, col_id)?;
                if !pick_row(state, row_id)?.children_ids.contains(&cell_id) {
                    state.insert_to(row_id, Position::Inner, &[&cell_id])?;
                }
                cell_ids.push(cell_id);
            }

            let stale: Vec<BlockId> = pick_row(state, row_id)?
                .children_ids
                .iter()
                .filter(|id| !cell_ids.contains(id))
                .cloned()
                .collect();
            for id in &stale {
                state.unlink_from(row_id, id);
            }
            get_row(state, row_id)?.children_ids = cell_ids;
        }
        Ok(())
    }

    /// Unlinks empty text cells from the listed rows.
    pub fn row_list_clean(&self, state: &mut State, block_ids: &[BlockId]) -> Result<()> {
        if block_ids.is_empty() {
            return Err(TableError::Empty("row"));
        }

        for row_id in block_ids {
            let empty: Vec<BlockId> = pick_row(state, row_id)?
                .children_ids
                .iter()
                .filter(|id| state.pick(id).is_some_and(Block::is_empty_text))
                .cloned()
                .collect();
            for cell_id in &empty {
                state.unlink_from(row_id, cell_id);
            }
        }
        Ok(())
    }

    pub fn row_set_header(&self, state: &mut State, req: &RowSetHeaderRequest) -> Result<()> {
        let table = Table::new(state, &req.target_id)?;
        let is_header = pick_row(state, &req.target_id)?
            .table_row()
            .is_some_and(|row| row.is_header);
        if is_header == req.is_header {
            return Ok(());
        }

        if let Some(row) = get_row(state, &req.target_id)?.table_row_mut() {
            row.is_header = req.is_header;
        }
        table.normalize_header_rows(state)
    }

    pub fn column_create(&self, state: &mut State, req: &ColumnCreateRequest) -> Result<BlockId> {
        let table = Table::new(state, &req.target_id)?;
        let (target_id, position) = match req.position {
            Position::Left | Position::Right => {
                pick_column(state, &req.target_id)?;
                (req.target_id.clone(), column_position(req.position)?)
            }
            Position::Inner => (table.columns_id().to_string(), Position::Inner),
            other => return Err(TableError::InvalidPosition(other)),
        };
        state.check_insert(&target_id, position)?;
        check_cell_ids(state, &table)?;

        let col_id = self.add_column_header(state)?;
        state.insert_to(&target_id, position, &[&col_id])?;

        self.clone_column_styles(state, &target_id, &col_id)?;

        let col_idx = table.make_column_index(state);
        for row_id in table.row_ids(state) {
            table.normalize_row(state, Some(&col_idx), &row_id)?;
        }
        Ok(col_id)
    }

    /// Copies non-empty cell backgrounds of `src_col_id` into `target_col_id`,
    /// creating the target cells where needed.
    pub fn clone_column_styles(
        &self,
        state: &mut State,
        src_col_id: &str,
        target_col_id: &str,
    ) -> Result<()> {
        let table = Table::new(state, src_col_id)?;
        check_cell_ids(state, &table)?;
        let col_idx = table.make_column_index(state);

        for row_id in table.row_ids(state) {
            let mut background = None;
            for cell_id in &pick_row(state, &row_id)?.children_ids {
                let (_, col_id) = parse_cell_id(cell_id)?;
                if col_id == src_col_id {
                    background = state
                        .pick(cell_id)
                        .map(|cell| cell.background_color.clone());
                }
            }
            let Some(background) = background.filter(|color| !color.is_empty()) else {
                continue;
            };

            let target_cell_id = provide_cell(state, &row_id, target_col_id)?;
            if let Some(cell) = state.get(&target_cell_id) {
                cell.background_color = background;
            }
            if !pick_row(state, &row_id)?.children_ids.contains(&target_cell_id) {
                state.insert_to(&row_id, Position::Inner, &[&target_cell_id])?;
            }
            table.normalize_row(state, Some(&col_idx), &row_id)?;
        }
        Ok(())
    }

    pub fn column_delete(&self, state: &mut State, target_id: &str) -> Result<()> {
        pick_column(state, target_id)?;
        let table = Table::new(state, target_id)?;

        let mut cells = Vec::new();
        for row_id in table.row_ids(state) {
            for cell_id in &pick_row(state, &row_id)?.children_ids {
                let (_, col_id) = parse_cell_id(cell_id)?;
                if col_id == target_id {
                    cells.push((row_id.clone(), cell_id.clone()));
                    break;
                }
            }
        }

        for (row_id, cell_id) in &cells {
            state.unlink_from(row_id, cell_id);
        }
        if !state.unlink(target_id) {
            return Err(StateError::NoParent(target_id.to_string()).into());
        }
        Ok(())
    }

    pub fn column_duplicate(
        &self,
        state: &mut State,
        req: &ColumnDuplicateRequest,
    ) -> Result<BlockId> {
        let position = column_position(req.position)?;
        let src_col = pick_column(state, &req.block_id)?.clone();
        pick_column(state, &req.target_id)?;
        let table = Table::new(state, &req.target_id)?;
        ensure_same_table(state, &table, &req.block_id)?;

        let mut copies = Vec::new();
        for row_id in table.row_ids(state) {
            let mut src_cell_id = None;
            for cell_id in &pick_row(state, &row_id)?.children_ids {
                let (_, col_id) = parse_cell_id(cell_id)?;
                if col_id == req.block_id {
                    src_cell_id = Some(cell_id.clone());
                    break;
                }
            }
            let Some(cell_id) = src_cell_id else {
                continue;
            };
            let cell = state
                .pick(&cell_id)
                .ok_or_else(|| TableError::NotFound(cell_id.clone()))?;
            copies.push((row_id, cell.clone()));
        }

        let new_col_id = self.generate_col_id.next_id();
        let mut new_col = src_col;
        new_col.id = new_col_id.clone();
        add_block(state, new_col)?;
        state.insert_to(&req.target_id, position, &[&new_col_id])?;

        let col_idx = table.make_column_index(state);
        for (row_id, mut cell) in copies {
            cell.id = make_cell_id(&row_id, &new_col_id);
            let cell_id = add_block(state, cell)?;
            get_row(state, &row_id)?.children_ids.push(cell_id);
            table.normalize_row(state, Some(&col_idx), &row_id)?;
        }
        Ok(new_col_id)
    }

    pub fn column_move(&self, state: &mut State, req: &ColumnMoveRequest) -> Result<()> {
        let position = column_position(req.position)?;
        pick_column(state, &req.target_id)?;
        pick_column(state, &req.drop_target_id)?;
        let table = Table::new(state, &req.target_id)?;
        ensure_same_table(state, &table, &req.drop_target_id)?;

        if req.target_id == req.drop_target_id {
            return Ok(());
        }

        state.check_insert(&req.drop_target_id, position)?;
        if !state.unlink_from(table.columns_id(), &req.target_id) {
            return Err(StateError::NoParent(req.target_id.clone()).into());
        }
        state.insert_to(&req.drop_target_id, position, &[&req.target_id])?;

        let col_idx = table.make_column_index(state);
        for row_id in table.row_ids(state) {
            table.normalize_row(state, Some(&col_idx), &row_id)?;
        }
        Ok(())
    }

    /// Creates the missing cells of the listed columns in every row.
    pub fn column_list_fill(&self, state: &mut State, block_ids: &[BlockId]) -> Result<()> {
        let Some(first) = block_ids.first() else {
            return Err(TableError::Empty("column"));
        };
        let table = Table::new(state, first)?;
        for col_id in block_ids {
            pick_column(state, col_id)?;
        }
        let rows = table.row_ids(state);
        for row_id in &rows {
            pick_row(state, row_id)?;
        }

        for col_id in block_ids {
            for row_id in &rows {
                let cell_id = make_cell_id(row_id, col_id);
                if state.exists(&cell_id)
                    && state.parent_id_of(&cell_id).is_some_and(|parent| parent != *row_id)
                {
                    return Err(TableError::AddCollision(cell_id));
                }
            }
        }

        for col_id in block_ids {
            for row_id in &rows {
                let cell_id = provide_cell(state, row_id, col_id)?;
                if !pick_row(state, row_id)?.children_ids.contains(&cell_id) {
                    state.insert_to(row_id, Position::Inner, &[&cell_id])?;
                }
            }
        }

        let col_idx = table.make_column_index(state);
        for row_id in &rows {
            table.normalize_row(state, Some(&col_idx), row_id)?;
        }
        Ok(())
    }

    /// Reorders regular rows by the text of their cell in the given column.
    /// Header rows keep their place and order.
    pub fn sort(&self, state: &mut State, req: &SortRequest) -> Result<()> {
        pick_column(state, &req.column_id)?;
        let table = Table::new(state, &req.column_id)?;

        let mut headers: Vec<BlockId> = Vec::new();
        let mut regular: Vec<(BlockId, String)> = Vec::new();
        for row_id in &table.rows(state)?.children_ids {
            let row = pick_row(state, row_id)?;
            if row.table_row().is_some_and(|row| row.is_header) {
                headers.push(row_id.clone());
                continue;
            }

            let mut value = String::new();
            for cell_id in &row.children_ids {
                let (_, col_id) = parse_cell_id(cell_id)?;
                if col_id == req.column_id {
                    value = state
                        .pick(cell_id)
                        .and_then(Block::text_content)
                        .map(|text| text.text.clone())
                        .unwrap_or_default();
                }
            }
            regular.push((row_id.clone(), value));
        }

        let collator = Collator::new();
        match req.order {
            SortOrder::Asc => regular.sort_by(|a, b| collator.compare(&a.1, &b.1)),
            SortOrder::Desc => regular.sort_by(|a, b| collator.compare(&b.1, &a.1)),
        }

        let ordered: Vec<BlockId> = headers
            .into_iter()
            .chain(regular.into_iter().map(|(id, _)| id))
            .collect();
        let rows = state
            .get(table.rows_id())
            .ok_or_else(|| TableError::NotFound(table.rows_id().to_string()))?;
        rows.children_ids = ordered;
        Ok(())
    }

    fn add_column_header(&self, state: &mut State) -> Result<BlockId> {
        add_block(state, Block::column(self.generate_col_id.next_id()))
    }

    fn add_row(&self, state: &mut State) -> Result<BlockId> {
        add_block(state, Block::row(self.generate_row_id.next_id(), false))
    }
}

fn add_block(state: &mut State, block: Block) -> Result<BlockId> {
    let id = block.id.clone();
    if !state.add(block) {
        return Err(TableError::AddCollision(id));
    }
    Ok(id)
}

fn add_cell(state: &mut State, row_id: &str, col_id: &str) -> Result<BlockId> {
    add_block(
        state,
        Block::new(
            make_cell_id(row_id, col_id),
            Content::Text(TextContent::default()),
        ),
    )
}

/// Returns the cell of `row_id` and `col_id`, creating it when missing. A
/// detached cell is reused; a cell held by another block collides.
fn provide_cell(state: &mut State, row_id: &str, col_id: &str) -> Result<BlockId> {
    let cell_id = make_cell_id(row_id, col_id);
    if !state.exists(&cell_id) {
        return add_cell(state, row_id, col_id);
    }
    match state.parent_id_of(&cell_id) {
        Some(parent) if parent != row_id => Err(TableError::AddCollision(cell_id)),
        _ => Ok(cell_id),
    }
}

fn check_cell_ids(state: &State, table: &Table) -> Result<()> {
    for row_id in table.row_ids(state) {
        for cell_id in &pick_row(state, &row_id)?.children_ids {
            parse_cell_id(cell_id)?;
        }
    }
    Ok(())
}

fn column_position(position: Position) -> Result<Position> {
    match position {
        Position::Left => Ok(Position::Top),
        Position::Right => Ok(Position::Bottom),
        other => Err(TableError::InvalidPosition(other)),
    }
}

fn ensure_same_table(state: &State, table: &Table, id: &str) -> Result<()> {
    if Table::new(state, id)?.id() != table.id() {
        return Err(TableError::wrong_kind(id, "block of the same table"));
    }
    Ok(())
}
