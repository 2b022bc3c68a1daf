// src/formatting/properties/formatters.rs
//! Read direction: API property JSON to a display projection.
//!
//! Dispatch is an exhaustive match over `PropertyType`; formula and rollup
//! values dispatch a second time on their declared result type and reuse the
//! same projections.

use super::types::DisplayValue;
use crate::error::AppError;
use crate::formatting::rich_text::plain_text;
use crate::model::{FormulaKind, PropertyType, RollupKind};
use serde_json::Value;

// --- Main Formatting Entry Point ---

/// Projects one property object (`{"type": "...", "<type>": ...}`).
///
/// `None` (the property is absent) and a null or empty payload both project
/// to `DisplayValue::Empty`. An unknown type tag is `UnrecognizedType`.
pub fn project_property(property: Option<&Value>) -> Result<DisplayValue, AppError> {
    let Some(property) = property else {
        return Ok(DisplayValue::Empty);
    };

    let tag = property
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("property has no type tag".to_string()))?;
    let kind = PropertyType::parse(tag)?;

    log::trace!("Projecting {} property", kind);
    project_typed(kind, property.get(tag))
}

/// Projects a payload already known to be of type `kind`.
pub fn project_typed(kind: PropertyType, payload: Option<&Value>) -> Result<DisplayValue, AppError> {
    use PropertyType::*;

    let payload = match payload {
        None | Some(Value::Null) => return Ok(DisplayValue::Empty),
        Some(value) => value,
    };

    match kind {
        Title | RichText => Ok(DisplayValue::text(plain_text(payload))),
        Number => project_number(kind, payload),
        Select | Status => project_named(kind, payload),
        MultiSelect => project_list(kind, payload, &["name"]),
        People => project_list(kind, payload, &["name", "id"]),
        Relation => project_list(kind, payload, &["id"]),
        Files => project_list(kind, payload, &["name"]),
        Date => project_date(payload),
        Checkbox => payload
            .as_bool()
            .map(DisplayValue::Boolean)
            .ok_or_else(|| unexpected(kind, payload)),
        Url | Email | PhoneNumber | CreatedTime | LastEditedTime => payload
            .as_str()
            .map(DisplayValue::text)
            .ok_or_else(|| unexpected(kind, payload)),
        CreatedBy | LastEditedBy => Ok(DisplayValue::text(user_name(payload))),
        UniqueId => Ok(project_unique_id(payload)),
        Verification => Ok(DisplayValue::text(
            payload.get("state").and_then(Value::as_str).unwrap_or(""),
        )),
        Formula => project_formula(payload),
        Rollup => project_rollup(payload),
        Button => Ok(DisplayValue::Empty),
    }
}

// --- Scalar Projections ---

fn project_number(kind: PropertyType, payload: &Value) -> Result<DisplayValue, AppError> {
    match payload {
        Value::Number(n) => Ok(DisplayValue::Number(n.clone())),
        other => Err(unexpected(kind, other)),
    }
}

fn project_named(kind: PropertyType, payload: &Value) -> Result<DisplayValue, AppError> {
    payload
        .get("name")
        .and_then(Value::as_str)
        .map(DisplayValue::text)
        .ok_or_else(|| unexpected(kind, payload))
}

/// Projects a date object; a missing start means no date is set.
fn project_date(payload: &Value) -> Result<DisplayValue, AppError> {
    let Some(start) = payload.get("start").and_then(Value::as_str) else {
        return match payload.get("start") {
            None | Some(Value::Null) => Ok(DisplayValue::Empty),
            Some(_) => Err(unexpected(PropertyType::Date, payload)),
        };
    };
    Ok(DisplayValue::DateRange {
        start: start.to_string(),
        end: payload
            .get("end")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn project_unique_id(payload: &Value) -> DisplayValue {
    let prefix = payload
        .get("prefix")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty());
    match (prefix, payload.get("number")) {
        (_, None | Some(Value::Null)) => DisplayValue::Empty,
        (Some(prefix), Some(number)) => DisplayValue::Text(format!("{}-{}", prefix, number)),
        (None, Some(Value::Number(n))) => DisplayValue::Number(n.clone()),
        (None, Some(other)) => DisplayValue::text(other.to_string()),
    }
}

// --- List Projections ---

/// Projects an array of objects to the first present key of each, in order.
fn project_list(
    kind: PropertyType,
    payload: &Value,
    keys: &[&str],
) -> Result<DisplayValue, AppError> {
    let items = payload.as_array().ok_or_else(|| unexpected(kind, payload))?;
    let names = items
        .iter()
        .map(|item| {
            keys.iter()
                .find_map(|key| item.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .ok_or_else(|| unexpected(kind, item))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DisplayValue::list(names))
}

fn user_name(user: &Value) -> &str {
    user.get("name")
        .and_then(Value::as_str)
        .or_else(|| user.get("id").and_then(Value::as_str))
        .unwrap_or("")
}

// --- Nested Projections ---

/// Formula results are re-projected according to their declared result type.
fn project_formula(payload: &Value) -> Result<DisplayValue, AppError> {
    let tag = payload.get("type").and_then(Value::as_str).unwrap_or("");
    let kind = FormulaKind::parse(tag)?;
    let inner = payload.get(kind.as_str());

    match kind {
        FormulaKind::String => Ok(inner
            .and_then(Value::as_str)
            .map_or(DisplayValue::Empty, DisplayValue::text)),
        FormulaKind::Number => project_typed(PropertyType::Number, inner),
        FormulaKind::Boolean => project_typed(PropertyType::Checkbox, inner),
        FormulaKind::Date => project_typed(PropertyType::Date, inner),
    }
}

/// Rollup results are re-projected according to their declared result type;
/// array elements are full property objects and go through `project_property`.
fn project_rollup(payload: &Value) -> Result<DisplayValue, AppError> {
    let tag = payload.get("type").and_then(Value::as_str).unwrap_or("");
    let kind = RollupKind::parse(tag)?;
    let inner = payload.get(kind.as_str());

    match kind {
        RollupKind::Number => project_typed(PropertyType::Number, inner),
        RollupKind::Date => project_typed(PropertyType::Date, inner),
        RollupKind::Array => {
            let elements = inner
                .and_then(Value::as_array)
                .ok_or_else(|| unexpected(PropertyType::Rollup, payload))?;
            let mut items = Vec::new();
            for element in elements {
                items.extend(project_property(Some(element))?.into_items());
            }
            Ok(DisplayValue::list(items))
        }
        RollupKind::Incomplete => Ok(DisplayValue::Empty),
        RollupKind::Unsupported => Err(AppError::unrecognized(
            crate::error::TypeContext::Rollup,
            kind.as_str(),
        )),
    }
}

fn unexpected(kind: PropertyType, payload: &Value) -> AppError {
    AppError::MalformedResponse(format!("{} value has unexpected shape: {}", kind, payload))
}
