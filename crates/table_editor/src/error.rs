use manos_block_state::{BlockId, Position, StateError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("block {0} is not found")]
    NotFound(BlockId),

    #[error("block {id} is not a {expected}")]
    WrongKind { id: BlockId, expected: &'static str },

    #[error("position {0:?} is not supported")]
    InvalidPosition(Position),

    #[error("invalid cell id {0}")]
    InvalidCellId(BlockId),

    #[error("root table block is not found for {0}")]
    TableRootNotFound(BlockId),

    #[error("inconsistent table {table_id}: {reason}")]
    InconsistentTable {
        table_id: BlockId,
        reason: &'static str,
    },

    #[error("block {0} already exists")]
    AddCollision(BlockId),

    #[error("blocks are restricted in this object")]
    Restricted,

    #[error("empty {0} list")]
    Empty(&'static str),

    #[error("block {0} is part of a table layout and cannot be moved")]
    MoveForbidden(BlockId),

    #[error(transparent)]
    State(#[from] StateError),
}

impl TableError {
    pub(crate) fn wrong_kind(id: &str, expected: &'static str) -> Self {
        TableError::WrongKind {
            id: id.to_string(),
            expected,
        }
    }
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
