use manos_block_state::{BlockId, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCreateRequest {
    pub target_id: BlockId,
    pub position: Position,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub with_header_row: bool,
}

impl TableCreateRequest {
    pub fn new(target_id: impl Into<BlockId>, position: Position) -> Self {
        Self {
            target_id: target_id.into(),
            position,
            columns: 0,
            rows: 0,
            with_header_row: false,
        }
    }

    pub fn size(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_header_row(mut self, with_header_row: bool) -> Self {
        self.with_header_row = with_header_row;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub target_id: BlockId,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub rows: u32,
}

/// Target and position, shared by the row and column creation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRequest {
    pub target_id: BlockId,
    pub position: Position,
}

impl TargetRequest {
    pub fn new(target_id: impl Into<BlockId>, position: Position) -> Self {
        Self {
            target_id: target_id.into(),
            position,
        }
    }
}

pub type RowCreateRequest = TargetRequest;
pub type ColumnCreateRequest = TargetRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRequest {
    /// The row or column being copied.
    pub block_id: BlockId,
    pub target_id: BlockId,
    pub position: Position,
}

impl DuplicateRequest {
    pub fn new(
        block_id: impl Into<BlockId>,
        target_id: impl Into<BlockId>,
        position: Position,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            target_id: target_id.into(),
            position,
        }
    }
}

pub type RowDuplicateRequest = DuplicateRequest;
pub type ColumnDuplicateRequest = DuplicateRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSetHeaderRequest {
    pub target_id: BlockId,
    pub is_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub target_id: BlockId,
    pub drop_target_id: BlockId,
    pub position: Position,
}

pub type RowMoveRequest = MoveRequest;
pub type ColumnMoveRequest = MoveRequest;

impl MoveRequest {
    pub fn new(
        target_id: impl Into<BlockId>,
        drop_target_id: impl Into<BlockId>,
        position: Position,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            drop_target_id: drop_target_id.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub column_id: BlockId,
    #[serde(default)]
    pub order: SortOrder,
}
