// src/formatting/rich_text/mod.rs
//! Rich text runs: reading them as plain text and building them for writes.
//!
//! Notion represents every piece of styled text as an array of runs. Display
//! only needs the concatenated plain text; writes need runs in the shape the
//! API accepts.

mod mentions;

pub use mentions::comment_runs;

use serde_json::{json, Value};

/// Concatenates the plain text of every run, in order.
///
/// Runs the API returns carry `plain_text`; runs built for a write only carry
/// `text.content`, so that is used as a fallback. Anything that isn't an array
/// yields an empty string.
pub fn plain_text(runs: &Value) -> String {
    runs.as_array()
        .map(|items| items.iter().map(run_text).collect())
        .unwrap_or_default()
}

/// Plain text of a single run.
fn run_text(run: &Value) -> &str {
    run.get("plain_text")
        .and_then(Value::as_str)
        .or_else(|| {
            run.get("text")
                .and_then(|t| t.get("content"))
                .and_then(Value::as_str)
        })
        .unwrap_or("")
}

/// A single unstyled text run.
pub fn text_run(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}
