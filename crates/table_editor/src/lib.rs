mod cell_id;
mod cleanup;
mod collate;
mod config;
mod editor;
mod error;
mod markdown;
mod move_guard;
mod normalize;
mod object;
mod paste;
mod request;
mod table;

pub use crate::cell_id::*;
pub use crate::collate::*;
pub use crate::config::*;
pub use crate::editor::*;
pub use crate::error::*;
pub use crate::markdown::*;
pub use crate::move_guard::*;
pub use crate::normalize::*;
pub use crate::object::*;
pub use crate::paste::*;
pub use crate::request::*;
pub use crate::table::*;
