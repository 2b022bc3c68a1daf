// src/model/block.rs
//! Content blocks as a typed tree.
//!
//! A block listing arrives as JSON objects keyed by their type tag. Each one is
//! parsed into a `BlockKind` variant carrying only what the outline needs,
//! together with any children embedded in the payload.

use crate::constants::BLOCK_MAX_RENDER_DEPTH;
use crate::error::{AppError, TypeContext};
use crate::formatting::rich_text::plain_text;
use serde_json::Value;

/// One node of a document body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Option<String>,
    pub kind: BlockKind,
    pub children: Vec<Block>,
}

/// Where an image's bytes live.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    External(String),
    Uploaded,
}

/// Type-specific payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    BulletedListItem { text: String },
    NumberedListItem { text: String },
    ToDo { text: String, checked: bool },
    Toggle { text: String },
    Code { language: String, text: String },
    Quote { text: String },
    Callout { icon: Option<String>, text: String },
    Divider,
    Table { width: u64 },
    TableRow { cells: Vec<String> },
    Image { source: ImageSource },
    Bookmark { url: String },
    Embed { url: String },
    ChildPage { title: String },
    ChildDatabase { title: String },
    Equation { expression: String },
    ColumnList,
    Column,
    SyncedBlock,
    TableOfContents,
    Breadcrumb,
    LinkToPage { target: String },
    /// File-like blocks (`file`, `pdf`, `video`, `audio`) share one shape.
    Media { label: &'static str, url: Option<String> },
    LinkPreview { url: String },
    Template { text: String },
    /// The API's own placeholder for blocks it cannot express.
    Unsupported,
}

impl Block {
    /// A block with no children.
    pub fn leaf(kind: BlockKind) -> Self {
        Self {
            id: None,
            kind,
            children: Vec::new(),
        }
    }

    /// A block with children.
    pub fn with_children(kind: BlockKind, children: Vec<Block>) -> Self {
        Self {
            id: None,
            kind,
            children,
        }
    }

    /// Parses a block listing's `results` array.
    pub fn parse_list(values: &[Value]) -> Result<Vec<Block>, AppError> {
        values.iter().map(|v| Self::parse_at(v, 0)).collect()
    }

    /// Parses one block object and its embedded children.
    pub fn from_json(value: &Value) -> Result<Block, AppError> {
        Self::parse_at(value, 0)
    }

    fn parse_at(value: &Value, depth: usize) -> Result<Block, AppError> {
        if depth >= BLOCK_MAX_RENDER_DEPTH {
            return Err(AppError::MalformedTree {
                limit: BLOCK_MAX_RENDER_DEPTH,
            });
        }

        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::MalformedResponse("block has no type tag".to_string()))?;
        let payload = value.get(tag).unwrap_or(&Value::Null);
        let kind = BlockKind::parse(tag, payload)?;

        // Children appear either beside the payload or inside it (the append shape).
        let child_values = value
            .get("children")
            .or_else(|| payload.get("children"))
            .and_then(Value::as_array);
        let children = match child_values {
            Some(items) => items
                .iter()
                .map(|child| Self::parse_at(child, depth + 1))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Block {
            id: value.get("id").and_then(Value::as_str).map(str::to_string),
            kind,
            children,
        })
    }

    /// The block's type tag.
    pub fn block_type(&self) -> &'static str {
        self.kind.tag()
    }
}

impl BlockKind {
    /// Builds the variant for `tag` from its payload object.
    pub fn parse(tag: &str, payload: &Value) -> Result<Self, AppError> {
        let text = || plain_text(payload.get("rich_text").unwrap_or(&Value::Null));
        let string = |key: &str| {
            payload
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        Ok(match tag {
            "heading_1" => Self::Heading { level: 1, text: text() },
            "heading_2" => Self::Heading { level: 2, text: text() },
            "heading_3" => Self::Heading { level: 3, text: text() },
            "paragraph" => Self::Paragraph { text: text() },
            "bulleted_list_item" => Self::BulletedListItem { text: text() },
            "numbered_list_item" => Self::NumberedListItem { text: text() },
            "to_do" => Self::ToDo {
                text: text(),
                checked: payload
                    .get("checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            "toggle" => Self::Toggle { text: text() },
            "code" => Self::Code {
                language: string("language"),
                text: text(),
            },
            "quote" => Self::Quote { text: text() },
            "callout" => Self::Callout {
                icon: payload
                    .get("icon")
                    .and_then(|icon| icon.get("emoji"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                text: text(),
            },
            "divider" => Self::Divider,
            "table" => Self::Table {
                width: payload
                    .get("table_width")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
            },
            "table_row" => Self::TableRow {
                cells: payload
                    .get("cells")
                    .and_then(Value::as_array)
                    .map(|cells| cells.iter().map(plain_text).collect())
                    .unwrap_or_default(),
            },
            "image" => Self::Image {
                source: match file_url(payload) {
                    Some(url) if is_external(payload) => ImageSource::External(url),
                    _ => ImageSource::Uploaded,
                },
            },
            "bookmark" => Self::Bookmark { url: string("url") },
            "embed" => Self::Embed { url: string("url") },
            "child_page" => Self::ChildPage { title: string("title") },
            "child_database" => Self::ChildDatabase { title: string("title") },
            "equation" => Self::Equation {
                expression: string("expression"),
            },
            "column_list" => Self::ColumnList,
            "column" => Self::Column,
            "synced_block" => Self::SyncedBlock,
            "table_of_contents" => Self::TableOfContents,
            "breadcrumb" => Self::Breadcrumb,
            "link_to_page" => Self::LinkToPage {
                target: ["page_id", "database_id", "comment_id"]
                    .iter()
                    .find_map(|key| payload.get(*key).and_then(Value::as_str))
                    .unwrap_or("")
                    .to_string(),
            },
            "file" => Self::Media {
                label: "File",
                url: file_url(payload),
            },
            "pdf" => Self::Media {
                label: "PDF",
                url: file_url(payload),
            },
            "video" => Self::Media {
                label: "Video",
                url: file_url(payload),
            },
            "audio" => Self::Media {
                label: "Audio",
                url: file_url(payload),
            },
            "link_preview" => Self::LinkPreview { url: string("url") },
            "template" => Self::Template { text: text() },
            "unsupported" => Self::Unsupported,
            other => return Err(AppError::unrecognized(TypeContext::Block, other)),
        })
    }

    /// The API's type tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Heading { level: 1, .. } => "heading_1",
            Self::Heading { level: 2, .. } => "heading_2",
            Self::Heading { .. } => "heading_3",
            Self::Paragraph { .. } => "paragraph",
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Toggle { .. } => "toggle",
            Self::Code { .. } => "code",
            Self::Quote { .. } => "quote",
            Self::Callout { .. } => "callout",
            Self::Divider => "divider",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "table_row",
            Self::Image { .. } => "image",
            Self::Bookmark { .. } => "bookmark",
            Self::Embed { .. } => "embed",
            Self::ChildPage { .. } => "child_page",
            Self::ChildDatabase { .. } => "child_database",
            Self::Equation { .. } => "equation",
            Self::ColumnList => "column_list",
            Self::Column => "column",
            Self::SyncedBlock => "synced_block",
            Self::TableOfContents => "table_of_contents",
            Self::Breadcrumb => "breadcrumb",
            Self::LinkToPage { .. } => "link_to_page",
            Self::Media { label: "PDF", .. } => "pdf",
            Self::Media { label: "Video", .. } => "video",
            Self::Media { label: "Audio", .. } => "audio",
            Self::Media { .. } => "file",
            Self::LinkPreview { .. } => "link_preview",
            Self::Template { .. } => "template",
            Self::Unsupported => "unsupported",
        }
    }
}

/// URL of a file object, whether hosted by Notion or external.
fn file_url(payload: &Value) -> Option<String> {
    ["external", "file"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(|f| f.get("url")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn is_external(payload: &Value) -> bool {
    payload.get("type").and_then(Value::as_str) == Some("external")
}
