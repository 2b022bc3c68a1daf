// src/formatting/properties/payload.rs
//! Write direction: caller-supplied values to the API's nested write shapes.
//!
//! Each writer checks the value's shape before emitting anything. A scalar
//! where a list is required (or the reverse) is `InvalidPropertyShape`, never
//! coerced.

use crate::error::AppError;
use crate::formatting::rich_text::text_run;
use crate::model::PropertyType;
use crate::types::NotionId;
use serde_json::{json, Map, Value};

/// Builds the write shape for one property: `{"<type>": <shape>}`.
///
/// Shorthand values are expanded (`"High"` for a select becomes
/// `{"name": "High"}`); values already in the API's shape are accepted where
/// that is unambiguous. `null` clears a property where the API allows it.
pub fn build_property_write(
    name: &str,
    kind: PropertyType,
    value: &Value,
) -> Result<Value, AppError> {
    use PropertyType::*;

    let shape = match kind {
        Title | RichText => write_runs(name, value)?,
        Number => match value {
            Value::Number(_) | Value::Null => value.clone(),
            other => return Err(expected(name, kind, "a number", other)),
        },
        Select | Status => match value {
            Value::Null => Value::Null,
            other => write_option(name, kind, other)?,
        },
        MultiSelect => Value::Array(
            list_items(name, kind, value)?
                .iter()
                .map(|item| write_option(name, kind, item))
                .collect::<Result<_, _>>()?,
        ),
        Date => write_date(name, value)?,
        People | Relation => Value::Array(
            list_items(name, kind, value)?
                .iter()
                .map(|item| write_reference(name, kind, item))
                .collect::<Result<_, _>>()?,
        ),
        Files => Value::Array(
            list_items(name, kind, value)?
                .iter()
                .map(|item| write_external_file(name, item))
                .collect::<Result<_, _>>()?,
        ),
        Checkbox => match value {
            Value::Bool(_) => value.clone(),
            other => return Err(expected(name, kind, "true or false", other)),
        },
        Url | Email | PhoneNumber => match value {
            Value::String(_) | Value::Null => value.clone(),
            other => return Err(expected(name, kind, "a string", other)),
        },
        Rollup | Formula | UniqueId | CreatedTime | LastEditedTime | CreatedBy | LastEditedBy
        | Verification | Button => {
            return Err(AppError::shape(
                name,
                format!("{} is computed by Notion and cannot be written", kind),
            ))
        }
    };

    let mut payload = Map::new();
    payload.insert(kind.as_str().to_string(), shape);
    Ok(Value::Object(payload))
}

/// Expands an `update` argument into the request body `{"properties": {...}}`.
///
/// Every entry must be `"<Property>": {"<type>": <value>}`; the single key
/// names the declared type.
pub fn build_update_payload(entries: &Map<String, Value>) -> Result<Value, AppError> {
    if entries.is_empty() {
        return Err(AppError::InvalidArguments(
            "update needs at least one property".to_string(),
        ));
    }

    let mut properties = Map::new();
    for (name, entry) in entries {
        let (tag, value) = match entry.as_object() {
            Some(object) if object.len() == 1 => object
                .iter()
                .next()
                .map(|(tag, value)| (tag.as_str(), value))
                .ok_or_else(|| typed_entry_error(name))?,
            _ => return Err(typed_entry_error(name)),
        };
        let kind = PropertyType::parse(tag)?;
        properties.insert(name.clone(), build_property_write(name, kind, value)?);
    }

    Ok(json!({ "properties": properties }))
}

fn typed_entry_error(name: &str) -> AppError {
    AppError::shape(name, "expected an object with one type key, e.g. {\"select\": \"Done\"}")
}

// --- Writers ---

fn write_runs(name: &str, value: &Value) -> Result<Value, AppError> {
    match value {
        Value::String(s) => Ok(json!([text_run(s)])),
        Value::Null => Ok(json!([])),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(text_run(s)),
                Value::Object(_) => Ok(item.clone()),
                other => Err(AppError::shape(
                    name,
                    format!("text runs must be strings or run objects, got {}", other),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(AppError::shape(
            name,
            format!("expected text or a list of runs, got {}", other),
        )),
    }
}

/// A select-style option: a bare name, or an object naming it by `name` or `id`.
fn write_option(name: &str, kind: PropertyType, value: &Value) -> Result<Value, AppError> {
    match value {
        Value::String(option) => Ok(json!({ "name": option })),
        Value::Object(object) if object.contains_key("name") || object.contains_key("id") => {
            Ok(value.clone())
        }
        other => Err(expected(name, kind, "an option name", other)),
    }
}

/// A person or page reference: an identifier string or `{"id": ...}`.
fn write_reference(name: &str, kind: PropertyType, value: &Value) -> Result<Value, AppError> {
    let raw = match value {
        Value::String(id) => id.as_str(),
        Value::Object(object) => object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| expected(name, kind, "an object with an id", value))?,
        other => return Err(expected(name, kind, "an identifier", other)),
    };
    let id = NotionId::parse(raw).map_err(|e| AppError::shape(name, e.to_string()))?;
    Ok(json!({ "id": id.as_str() }))
}

fn write_external_file(name: &str, value: &Value) -> Result<Value, AppError> {
    match value {
        Value::String(url) => Ok(json!({
            "name": url,
            "type": "external",
            "external": { "url": url }
        })),
        Value::Object(_) => Ok(value.clone()),
        other => Err(expected(name, PropertyType::Files, "a file URL", other)),
    }
}

/// Dates always carry both `start` and `end`, with `end` null when absent.
fn write_date(name: &str, value: &Value) -> Result<Value, AppError> {
    let (start, end) = match value {
        Value::Null => return Ok(Value::Null),
        Value::String(start) => (start.as_str(), None),
        Value::Array(parts) => match parts.as_slice() {
            [Value::String(start)] => (start.as_str(), None),
            [Value::String(start), Value::String(end)] => (start.as_str(), Some(end.as_str())),
            _ => {
                return Err(AppError::shape(
                    name,
                    "a date list must be [start] or [start, end] strings",
                ))
            }
        },
        Value::Object(object) => {
            let start = object.get("start").and_then(Value::as_str).ok_or_else(|| {
                AppError::shape(name, "a date object needs a string \"start\"")
            })?;
            let end = match object.get("end") {
                None | Some(Value::Null) => None,
                Some(Value::String(end)) => Some(end.as_str()),
                Some(other) => {
                    return Err(AppError::shape(
                        name,
                        format!("date \"end\" must be a string, got {}", other),
                    ))
                }
            };
            (start, end)
        }
        other => return Err(expected(name, PropertyType::Date, "a date", other)),
    };

    check_date(name, start)?;
    if let Some(end) = end {
        check_date(name, end)?;
    }

    let mut shape = json!({ "start": start, "end": end });
    if let Some(zone) = value.get("time_zone") {
        shape["time_zone"] = zone.clone();
    }
    Ok(shape)
}

/// Accepts ISO 8601 dates (`2024-05-01`) and date-times with an offset.
fn check_date(name: &str, raw: &str) -> Result<(), AppError> {
    let valid = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(raw).is_ok()
        || chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").is_ok();
    if valid {
        Ok(())
    } else {
        Err(AppError::shape(
            name,
            format!("'{}' is not an ISO 8601 date", raw),
        ))
    }
}

/// The elements of a list-valued write; anything else is a caller error.
fn list_items<'v>(
    name: &str,
    kind: PropertyType,
    value: &'v Value,
) -> Result<&'v Vec<Value>, AppError> {
    value
        .as_array()
        .ok_or_else(|| expected(name, kind, "a list", value))
}

fn expected(name: &str, kind: PropertyType, what: &str, got: &Value) -> AppError {
    AppError::shape(name, format!("{} expects {}, got {}", kind, what, got))
}
