// src/formatting/sections.rs
//! Text layouts for each verb's output.
//!
//! Each function takes already-parsed API objects and returns the finished
//! text; none of them touch the network.

use super::properties::{project_property, render_property_value};
use super::rich_text::plain_text;
use crate::api::responses::{CommentObject, NotionObject};
use crate::constants::{BANNER_WIDTH, INDENT_SPACES, SHORT_USER_ID_LENGTH};
use crate::error::AppError;
use crate::model::PropertyType;
use serde_json::Value;
use std::fmt::Write;

const UNTITLED: &str = "Untitled";

// --- Titles ---

/// Finds an object's title: a database's top-level runs, or the page
/// property whose type is `title`.
pub fn object_title(object: &NotionObject) -> String {
    let title = if !object.title.is_empty() {
        plain_text(&Value::Array(object.title.clone()))
    } else {
        title_property(object)
            .and_then(|(_, property)| property.get("title"))
            .map(plain_text)
            .unwrap_or_default()
    };

    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn title_property(object: &NotionObject) -> Option<(&String, &Value)> {
    object
        .properties
        .iter()
        .find(|(_, property)| property.get("type").and_then(Value::as_str) == Some("title"))
}

fn is_title(property: &Value) -> bool {
    property.get("type").and_then(Value::as_str) == Some("title")
}

// --- Page Report ---

/// The page banner followed by its ID and timestamps.
pub fn page_header(page: &NotionObject) -> Result<String, AppError> {
    let rule = "=".repeat(BANNER_WIDTH);
    let title = match page.emoji() {
        Some(emoji) => format!("{} {}", emoji, object_title(page)),
        None => object_title(page),
    };

    let mut out = String::new();
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "ID: {}", page.id)?;
    if let Some(url) = &page.url {
        writeln!(out, "URL: {}", url)?;
    }
    writeln!(out, "Created: {}", page.created_time.as_deref().unwrap_or("-"))?;
    writeln!(out, "Updated: {}", page.last_edited_time.as_deref().unwrap_or("-"))?;
    Ok(out)
}

/// Indented `Name: value` lines for every non-title property, sorted by name.
pub fn properties_section(page: &NotionObject) -> Result<String, AppError> {
    let indent = " ".repeat(INDENT_SPACES);
    let mut out = String::new();
    for (name, property) in &page.properties {
        if is_title(property) {
            continue;
        }
        writeln!(out, "{}{}: {}", indent, name, render_property_value(Some(property))?)?;
    }
    if out.is_empty() {
        writeln!(out, "{}(no properties)", indent)?;
    }
    Ok(out)
}

/// Every property including the title, one `Name: value` per line.
pub fn props_listing(page: &NotionObject) -> Result<String, AppError> {
    let mut out = String::new();
    for (name, property) in &page.properties {
        writeln!(out, "{}: {}", name, render_property_value(Some(property))?)?;
    }
    Ok(out)
}

/// A failed section in a composite report.
pub fn error_marker(error: &AppError) -> String {
    format!("[error: {}]\n", error)
}

// --- Comments ---

pub fn comments_listing(comments: &[CommentObject]) -> String {
    if comments.is_empty() {
        return "(no comments)\n".to_string();
    }

    let indent = " ".repeat(INDENT_SPACES);
    let mut out = String::new();
    for comment in comments {
        let when = comment
            .created_time
            .as_deref()
            .map(short_timestamp)
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!("[{}] {}:\n", when, comment_author(comment)));
        for line in plain_text(&comment.rich_text).lines() {
            out.push_str(&format!("{}{}\n", indent, line));
        }
        out.push('\n');
    }
    out
}

fn comment_author(comment: &CommentObject) -> String {
    match &comment.created_by {
        Some(user) => match &user.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => user.id.chars().take(SHORT_USER_ID_LENGTH).collect(),
        },
        None => "unknown".to_string(),
    }
}

/// `2024-03-01T09:30:00.000Z` becomes `2024-03-01 09:30`; other text is kept.
fn short_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

// --- Search and Query ---

pub fn search_listing(results: &[NotionObject]) -> String {
    if results.is_empty() {
        return "No results found.\n".to_string();
    }

    let mut out = String::new();
    for object in results {
        out.push_str(&format!("[{}] {}\n", object.object, object_title(object)));
        out.push_str(&format!("  ID: {}\n", object.id));
        if let Some(url) = &object.url {
            out.push_str(&format!("  URL: {}\n", url));
        }
        out.push('\n');
    }
    out
}

/// Rows with their title, ID and every property that has a value.
pub fn query_listing(rows: &[NotionObject]) -> Result<String, AppError> {
    let mut out = String::new();
    writeln!(out, "Found {} result(s)", rows.len())?;

    for row in rows {
        writeln!(out)?;
        writeln!(out, "{}", object_title(row))?;
        writeln!(out, "  ID: {}", row.id)?;
        for (name, property) in &row.properties {
            if is_title(property) {
                continue;
            }
            let value = project_property(Some(property))?;
            if value.is_empty() {
                continue;
            }
            writeln!(out, "  {}: {}", name, value)?;
        }
    }
    Ok(out)
}

// --- Schema ---

/// A database's title and each property's declared type, sorted by name.
pub fn schema_listing(database: &NotionObject) -> Result<String, AppError> {
    let mut out = String::new();
    writeln!(out, "{}", object_title(database))?;
    writeln!(out, "ID: {}", database.id)?;
    writeln!(out)?;

    for (name, property) in &database.properties {
        let tag = property.get("type").and_then(Value::as_str).ok_or_else(|| {
            AppError::MalformedResponse(format!("schema property '{}' has no type", name))
        })?;
        let kind = PropertyType::parse(tag)?;

        write!(out, "  {}: {}", name, kind)?;
        if kind.is_computed() {
            write!(out, " (read-only)")?;
        }
        let options = option_names(property.get(tag));
        if !options.is_empty() {
            write!(out, " [{}]", options.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Option names for select-style schema entries.
fn option_names(config: Option<&Value>) -> Vec<String> {
    config
        .and_then(|c| c.get("options"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// --- Confirmations ---

pub fn comment_posted(comment: &CommentObject) -> String {
    format!(
        "Comment posted: {}\nTime: {}\n",
        comment.id,
        comment.created_time.as_deref().unwrap_or("-")
    )
}

pub fn page_updated(page: &NotionObject) -> String {
    format!(
        "Page updated: {}\nUpdated at: {}\n",
        page.id,
        page.last_edited_time.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> NotionObject {
        serde_json::from_value(value).unwrap()
    }

    fn sample_page() -> NotionObject {
        object(json!({
            "object": "page",
            "id": "11111111-2222-3333-4444-555555555555",
            "url": "https://www.notion.so/Plan-11111111222233334444555555555555",
            "icon": {"type": "emoji", "emoji": "📘"},
            "created_time": "2024-03-01T09:30:00.000Z",
            "last_edited_time": "2024-03-02T10:00:00.000Z",
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": "Plan"}]},
                "Status": {"type": "status", "status": {"name": "Doing"}},
                "Tags": {"type": "multi_select", "multi_select": []},
                "Done": {"type": "checkbox", "checkbox": false}
            }
        }))
    }

    #[test]
    fn header_has_banner_and_metadata() {
        insta::assert_snapshot!(page_header(&sample_page()).unwrap(), @r"
        ============================================================
        📘 Plan
        ============================================================
        ID: 11111111-2222-3333-4444-555555555555
        URL: https://www.notion.so/Plan-11111111222233334444555555555555
        Created: 2024-03-01T09:30:00.000Z
        Updated: 2024-03-02T10:00:00.000Z
        ");
    }

    #[test]
    fn properties_are_sorted_and_skip_title() {
        assert_eq!(
            properties_section(&sample_page()).unwrap(),
            "  Done: ✗\n  Status: Doing\n  Tags: (empty)\n"
        );
    }

    #[test]
    fn props_listing_includes_title() {
        assert_eq!(
            props_listing(&sample_page()).unwrap(),
            "Done: ✗\nName: Plan\nStatus: Doing\nTags: (empty)\n"
        );
    }

    #[test]
    fn query_listing_skips_empty_values() {
        let rows = vec![sample_page()];
        assert_eq!(
            query_listing(&rows).unwrap(),
            "Found 1 result(s)\n\nPlan\n  ID: 11111111-2222-3333-4444-555555555555\n  Done: ✗\n  Status: Doing\n"
        );
    }

    #[test]
    fn comments_fall_back_to_short_user_id() {
        let comments: Vec<CommentObject> = serde_json::from_value(json!([
            {
                "id": "c1",
                "created_time": "2024-03-01T09:30:00.000Z",
                "created_by": {"object": "user", "id": "abcdef12-3456"},
                "rich_text": [{"plain_text": "Looks good"}]
            }
        ]))
        .unwrap();
        assert_eq!(
            comments_listing(&comments),
            "[2024-03-01 09:30] abcdef12:\n  Looks good\n\n"
        );
        assert_eq!(comments_listing(&[]), "(no comments)\n");
    }

    #[test]
    fn search_uses_database_title_runs() {
        let results = vec![object(json!({
            "object": "database",
            "id": "d1",
            "url": "https://www.notion.so/d1",
            "title": [{"plain_text": "Tasks"}]
        }))];
        assert_eq!(
            search_listing(&results),
            "[database] Tasks\n  ID: d1\n  URL: https://www.notion.so/d1\n\n"
        );
        assert_eq!(search_listing(&[]), "No results found.\n");
    }

    #[test]
    fn schema_marks_computed_and_lists_options() {
        let database = object(json!({
            "object": "database",
            "id": "d1",
            "title": [{"plain_text": "Tasks"}],
            "properties": {
                "Name": {"id": "title", "type": "title", "title": {}},
                "Score": {"id": "a", "type": "formula", "formula": {"expression": "1"}},
                "Status": {"id": "b", "type": "select", "select": {"options": [{"name": "Open"}, {"name": "Closed"}]}}
            }
        }));
        assert_eq!(
            schema_listing(&database).unwrap(),
            "Tasks\nID: d1\n\n  Name: title\n  Score: formula (read-only)\n  Status: select [Open, Closed]\n"
        );
    }

    #[test]
    fn schema_rejects_unknown_types() {
        let database = object(json!({
            "id": "d1",
            "properties": {"Mystery": {"type": "hologram", "hologram": {}}}
        }));
        let err = schema_listing(&database).unwrap_err();
        assert!(matches!(err, AppError::UnrecognizedType { ref tag, .. } if tag == "hologram"));
    }
}
