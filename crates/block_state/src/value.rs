use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::error::StateError;
use crate::state::State;

const DEFAULT_SCHEMA: &str = "manos-blocks";
const DEFAULT_VERSION: u32 = 1;

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

/// Versioned JSON envelope for a document state. Only blocks reachable from
/// the root are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateValue {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_version")]
    pub version: u32,
    pub root_id: BlockId,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl StateValue {
    pub fn from_state(state: &State) -> Self {
        Self {
            schema: default_schema(),
            version: default_version(),
            root_id: state.root_id().to_string(),
            blocks: state.blocks().into_iter().cloned().collect(),
        }
    }

    pub fn into_state(self) -> Result<State, StateError> {
        State::from_blocks(self.root_id, self.blocks)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
