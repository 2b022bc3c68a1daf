// src/formatting/rich_text/mentions.rs
//! Comment text with `<@user-id>` mention tokens.

use super::text_run;
use crate::error::AppError;
use crate::types::NotionId;
use regex::Regex;
use serde_json::{json, Value};

lazy_static::lazy_static! {
    static ref MENTION: Regex = Regex::new(r"<@([^<>\s]+)>")
        .expect("Failed to compile mention regex - this is a bug in the code");
}

/// Splits comment text into text runs and user-mention runs.
///
/// Each `<@id>` token becomes a mention of that user; the id accepts any shape
/// the identifier parser does. Text between tokens is kept verbatim.
pub fn comment_runs(text: &str) -> Result<Vec<Value>, AppError> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for captures in MENTION.captures_iter(text) {
        let (Some(token), Some(raw_id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if token.start() > cursor {
            runs.push(text_run(&text[cursor..token.start()]));
        }

        let user_id = NotionId::parse(raw_id.as_str()).map_err(|e| {
            AppError::InvalidArguments(format!("bad mention '{}': {}", token.as_str(), e))
        })?;
        runs.push(json!({
            "type": "mention",
            "mention": { "type": "user", "user": { "id": user_id.as_str() } }
        }));

        cursor = token.end();
    }

    if cursor < text.len() {
        runs.push(text_run(&text[cursor..]));
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_comment_is_one_run() {
        let runs = comment_runs("Looks good").unwrap();
        assert_eq!(runs, vec![text_run("Looks good")]);
    }

    #[test]
    fn mentions_split_the_text() {
        let runs = comment_runs("cc <@550e8400e29b41d4a716446655440000> please").unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], text_run("cc "));
        assert_eq!(
            runs[1]["mention"]["user"]["id"],
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(runs[2], text_run(" please"));
    }

    #[test]
    fn bad_mention_is_an_argument_error() {
        let err = comment_runs("hi <@nobody>").unwrap_err();
        assert!(matches!(err, AppError::InvalidArguments(_)));
    }
}
