mod block;
mod error;
mod id;
mod position;
mod state;
mod value;

pub use crate::block::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::position::*;
pub use crate::state::*;
pub use crate::value::*;
