// src/formatting/mod.rs
//! Turns Notion JSON into terminal text, and caller values into write shapes.

pub mod block_renderer;
pub mod properties;
pub mod rich_text;
pub mod sections;

pub use block_renderer::{render_blocks, render_outline};
pub use properties::{
    build_property_write, build_update_payload, project_property, render_property_value,
    DisplayValue,
};
