// src/model/property.rs
//! The closed set of property type tags.
//!
//! Every tag the client understands is a variant here. Parsing an unknown tag
//! is an `UnrecognizedType` error, never a silent pass-through.

use crate::error::{AppError, TypeContext};
use std::fmt;

/// A property's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Status,
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Relation,
    Rollup,
    Formula,
    UniqueId,
    CreatedTime,
    LastEditedTime,
    CreatedBy,
    LastEditedBy,
    Verification,
    /// An action column; it carries no value.
    Button,
}

impl PropertyType {
    /// Parses the API's type tag.
    pub fn parse(tag: &str) -> Result<Self, AppError> {
        use PropertyType::*;

        Ok(match tag {
            "title" => Title,
            "rich_text" => RichText,
            "number" => Number,
            "select" => Select,
            "multi_select" => MultiSelect,
            "status" => Status,
            "date" => Date,
            "people" => People,
            "files" => Files,
            "checkbox" => Checkbox,
            "url" => Url,
            "email" => Email,
            "phone_number" => PhoneNumber,
            "relation" => Relation,
            "rollup" => Rollup,
            "formula" => Formula,
            "unique_id" => UniqueId,
            "created_time" => CreatedTime,
            "last_edited_time" => LastEditedTime,
            "created_by" => CreatedBy,
            "last_edited_by" => LastEditedBy,
            "verification" => Verification,
            "button" => Button,
            other => return Err(AppError::unrecognized(TypeContext::Property, other)),
        })
    }

    /// The API's type tag, which is also the payload key.
    pub fn as_str(&self) -> &'static str {
        use PropertyType::*;

        match self {
            Title => "title",
            RichText => "rich_text",
            Number => "number",
            Select => "select",
            MultiSelect => "multi_select",
            Status => "status",
            Date => "date",
            People => "people",
            Files => "files",
            Checkbox => "checkbox",
            Url => "url",
            Email => "email",
            PhoneNumber => "phone_number",
            Relation => "relation",
            Rollup => "rollup",
            Formula => "formula",
            UniqueId => "unique_id",
            CreatedTime => "created_time",
            LastEditedTime => "last_edited_time",
            CreatedBy => "created_by",
            LastEditedBy => "last_edited_by",
            Verification => "verification",
            Button => "button",
        }
    }

    /// Whether Notion computes this value itself.
    pub fn is_computed(&self) -> bool {
        use PropertyType::*;

        matches!(
            self,
            Rollup
                | Formula
                | UniqueId
                | CreatedTime
                | LastEditedTime
                | CreatedBy
                | LastEditedBy
                | Verification
                | Button
        )
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result type of a formula property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    String,
    Number,
    Boolean,
    Date,
}

impl FormulaKind {
    pub fn parse(tag: &str) -> Result<Self, AppError> {
        match tag {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            other => Err(AppError::unrecognized(TypeContext::Formula, other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// The result type of a rollup property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupKind {
    Number,
    Date,
    Array,
    /// The rollup spans more relations than the API computed.
    Incomplete,
    /// The API could not express the aggregation.
    Unsupported,
}

impl RollupKind {
    pub fn parse(tag: &str) -> Result<Self, AppError> {
        match tag {
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "array" => Ok(Self::Array),
            "incomplete" => Ok(Self::Incomplete),
            "unsupported" => Ok(Self::Unsupported),
            other => Err(AppError::unrecognized(TypeContext::Rollup, other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            Self::Array => "array",
            Self::Incomplete => "incomplete",
            Self::Unsupported => "unsupported",
        }
    }
}
