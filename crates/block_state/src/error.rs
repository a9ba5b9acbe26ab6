use thiserror::Error;

use crate::block::BlockId;
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("block {0} is not found")]
    NotFound(BlockId),

    #[error("block {0} already exists")]
    AlreadyExists(BlockId),

    #[error("target {0} has no parent")]
    NoParent(BlockId),

    #[error("position {0:?} is not supported by the state")]
    UnsupportedPosition(Position),

    #[error("block {0} is reachable more than once")]
    DuplicateReference(BlockId),

    #[error("root block {0} is missing")]
    MissingRoot(BlockId),
}
