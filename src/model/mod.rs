//! Typed views of the API's tagged JSON: property type tags and block trees.

mod block;
mod property;

pub use block::{Block, BlockKind, ImageSource};
pub use property::{FormulaKind, PropertyType, RollupKind};
