// src/formatting/properties/mod.rs
//! Typed property codec.
//!
//! Two independent, pure directions:
//! - read: an API property object to a [`DisplayValue`]
//! - write: a declared type plus a caller value to the API's write shape

mod formatters;
mod payload;
mod render;
mod types;

// Re-export the public interface
pub use formatters::{project_property, project_typed};
pub use payload::{build_property_write, build_update_payload};
pub use types::DisplayValue;

use crate::error::AppError;
use serde_json::Value;

/// Renders a property for display; absent or empty values render as `(empty)`.
pub fn render_property_value(property: Option<&Value>) -> Result<String, AppError> {
    Ok(project_property(property)?.to_string())
}
