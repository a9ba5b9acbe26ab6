use serde::{Deserialize, Serialize};

/// Where blocks land relative to a target block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Sibling, immediately before the target.
    Top,
    /// Sibling, immediately after the target.
    Bottom,
    Left,
    Right,
    /// Appended to the target's children.
    Inner,
    /// Takes the target's place in its parent.
    Replace,
}

impl Position {
    pub fn is_sibling(self) -> bool {
        matches!(self, Position::Top | Position::Bottom)
    }
}
