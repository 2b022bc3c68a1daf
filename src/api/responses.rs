// src/api/responses.rs
//! Serde shapes for the Notion API responses this client reads.
//!
//! Only the envelope fields are typed. Property values stay as raw JSON and
//! go through the property codec, which owns the type-tag dispatch.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Generic paginated response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// A page or database object.
///
/// Pages carry property values; databases carry the property schema under
/// the same key and their title as a top-level run list.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionObject {
    #[serde(default)]
    pub object: String,
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub title: Vec<Value>,
}

impl NotionObject {
    /// The emoji icon, if the object has one.
    pub fn emoji(&self) -> Option<&str> {
        self.icon.as_ref().and_then(|icon| icon.emoji.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentObject {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub created_by: Option<PartialUser>,
    #[serde(default)]
    pub rich_text: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartialUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Notion's error body: `{"object": "error", "status", "code", "message"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

pub type PageList = PaginatedResponse<NotionObject>;
pub type BlockList = PaginatedResponse<Value>;
pub type CommentList = PaginatedResponse<CommentObject>;
