// src/config.rs
//! Command-line surface and its validation into a [`Command`].
//!
//! clap handles the verb and required positionals; everything whose shape
//! clap cannot check (identifiers, JSON arguments, page sizes, mention
//! tokens) is validated in `Command::try_from` before any credential lookup
//! or network call.

use crate::constants::{
    BLOCKS_PAGE_SIZE, DATABASE_QUERY_PAGE_SIZE, NOTION_MAX_PAGE_SIZE, SEARCH_PAGE_SIZE,
};
use crate::error::AppError;
use crate::formatting::build_update_payload;
use crate::formatting::rich_text::comment_runs;
use crate::types::NotionId;
use clap::{Parser, Subcommand};
use serde_json::Value;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(name = "notion-cli", author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub verb: Verb,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Show a page: properties, content and comments
    Page {
        /// Page URL or ID
        target: String,
        /// Number of top-level blocks to fetch (1-100)
        #[arg(long, default_value_t = BLOCKS_PAGE_SIZE)]
        page_size: u32,
    },
    /// Show a page's properties
    Props {
        /// Page URL or ID
        target: String,
    },
    /// Show a page's content as an outline
    Blocks {
        /// Page or block URL or ID
        target: String,
        /// Number of top-level blocks to fetch (1-100)
        #[arg(long, default_value_t = BLOCKS_PAGE_SIZE)]
        page_size: u32,
    },
    /// List a page's comments
    Comments {
        /// Page URL or ID
        target: String,
    },
    /// Search pages and databases shared with the integration
    Search {
        /// Search text; multiple words are joined with spaces
        query: Vec<String>,
        /// Number of results (1-100)
        #[arg(long, default_value_t = SEARCH_PAGE_SIZE)]
        page_size: u32,
    },
    /// Post a comment on a page; `<@user-id>` mentions a user
    Comment {
        /// Page URL or ID
        target: String,
        /// Comment text; multiple words are joined with spaces
        text: Vec<String>,
    },
    /// Update page properties from a JSON object
    Update {
        /// Page URL or ID
        target: String,
        /// e.g. '{"Status": {"status": "Done"}, "Points": {"number": 3}}'
        properties: Option<String>,
    },
    /// Query a database, optionally with a JSON filter
    Db {
        /// Database URL or ID
        database: String,
        /// Notion filter object, passed through as-is
        filter: Option<String>,
        /// Number of rows (1-100)
        #[arg(long, default_value_t = DATABASE_QUERY_PAGE_SIZE)]
        page_size: u32,
    },
    /// Show a database's property schema
    Schema {
        /// Database URL or ID
        database: String,
    },
}

/// A validated invocation: exactly one verb with well-formed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Page { id: NotionId, page_size: u32 },
    Props { id: NotionId },
    Blocks { id: NotionId, page_size: u32 },
    Comments { id: NotionId },
    Search { query: String, page_size: u32 },
    Comment { id: NotionId, rich_text: Vec<Value> },
    Update { id: NotionId, payload: Value },
    Query { database: NotionId, filter: Option<Value>, page_size: u32 },
    Schema { database: NotionId },
}

impl Command {
    /// The verb as typed on the command line.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Page { .. } => "page",
            Self::Props { .. } => "props",
            Self::Blocks { .. } => "blocks",
            Self::Comments { .. } => "comments",
            Self::Search { .. } => "search",
            Self::Comment { .. } => "comment",
            Self::Update { .. } => "update",
            Self::Query { .. } => "db",
            Self::Schema { .. } => "schema",
        }
    }
}

impl TryFrom<Verb> for Command {
    type Error = AppError;

    fn try_from(verb: Verb) -> Result<Self, Self::Error> {
        let command = match verb {
            Verb::Page { target, page_size } => Command::Page {
                id: NotionId::parse(&target)?,
                page_size: checked_page_size(page_size)?,
            },
            Verb::Props { target } => Command::Props {
                id: NotionId::parse(&target)?,
            },
            Verb::Blocks { target, page_size } => Command::Blocks {
                id: NotionId::parse(&target)?,
                page_size: checked_page_size(page_size)?,
            },
            Verb::Comments { target } => Command::Comments {
                id: NotionId::parse(&target)?,
            },
            Verb::Search { query, page_size } => Command::Search {
                query: joined_words(query, "search needs query text")?,
                page_size: checked_page_size(page_size)?,
            },
            Verb::Comment { target, text } => {
                let id = NotionId::parse(&target)?;
                let text = joined_words(text, "comment needs the comment text")?;
                Command::Comment {
                    id,
                    rich_text: comment_runs(&text)?,
                }
            }
            Verb::Update { target, properties } => {
                let id = NotionId::parse(&target)?;
                let raw = properties.ok_or_else(|| {
                    AppError::InvalidArguments(
                        "update needs a JSON object of properties".to_string(),
                    )
                })?;
                let entries = match parse_json_argument("properties", &raw)? {
                    Value::Object(entries) => entries,
                    other => {
                        return Err(AppError::InvalidArguments(format!(
                            "properties must be a JSON object, got {}",
                            json_kind(&other)
                        )))
                    }
                };
                Command::Update {
                    id,
                    payload: build_update_payload(&entries)?,
                }
            }
            Verb::Db {
                database,
                filter,
                page_size,
            } => {
                let database = NotionId::parse(&database)?;
                let filter = match filter {
                    None => None,
                    Some(raw) => match parse_json_argument("filter", &raw)? {
                        filter @ Value::Object(_) => Some(filter),
                        other => {
                            return Err(AppError::InvalidArguments(format!(
                                "filter must be a JSON object, got {}",
                                json_kind(&other)
                            )))
                        }
                    },
                };
                Command::Query {
                    database,
                    filter,
                    page_size: checked_page_size(page_size)?,
                }
            }
            Verb::Schema { database } => Command::Schema {
                database: NotionId::parse(&database)?,
            },
        };

        log::debug!("Validated '{}' command", command.verb());
        Ok(command)
    }
}

fn checked_page_size(size: u32) -> Result<u32, AppError> {
    match size {
        1..=NOTION_MAX_PAGE_SIZE => Ok(size),
        _ => Err(AppError::InvalidArguments(format!(
            "--page-size must be between 1 and {}, got {}",
            NOTION_MAX_PAGE_SIZE, size
        ))),
    }
}

fn joined_words(words: Vec<String>, missing: &str) -> Result<String, AppError> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        Err(AppError::InvalidArguments(missing.to_string()))
    } else {
        Ok(joined)
    }
}

fn parse_json_argument(what: &str, raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidArguments(format!("{} is not valid JSON: {}", what, e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
