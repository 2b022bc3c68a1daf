// src/formatting/properties/types.rs
//! The display projection of a property value.

/// A property value reduced to what a reader needs to see.
///
/// Absent and present-but-empty values both project to `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Empty,
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    /// Ordered names or identifiers (multi-select options, people, relations).
    List(Vec<String>),
    DateRange {
        start: String,
        end: Option<String>,
    },
}

impl DisplayValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayValue::Empty)
    }

    /// Wraps text, mapping the empty string to `Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            DisplayValue::Empty
        } else {
            DisplayValue::Text(s)
        }
    }

    /// Wraps a list, mapping the empty list to `Empty`.
    pub fn list(items: Vec<String>) -> Self {
        if items.is_empty() {
            DisplayValue::Empty
        } else {
            DisplayValue::List(items)
        }
    }

    /// Flattens the value into display strings, dropping `Empty`.
    pub fn into_items(self) -> Vec<String> {
        match self {
            DisplayValue::Empty => Vec::new(),
            DisplayValue::List(items) => items,
            other => vec![other.to_string()],
        }
    }
}
