// src/error.rs
//! Application error types.
//!
//! Each variant names one way an invocation can fail. None of them is retried;
//! the binary prints the message and exits non-zero.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// The API reports failures as a JSON body with a `code` string. Parsing it
/// once here keeps the rest of the crate free of magic strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    RateLimited,
    ObjectNotFound,
    Unauthorized,
    RestrictedResource,
    InvalidJson,
    ValidationFailed,
    Conflict,
    InternalError,
    ServiceUnavailable,
    /// The body was not a Notion error object; only the status is known.
    HttpStatus(u16),
    /// A code this client doesn't recognize yet.
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error means the resource doesn't exist or isn't shared
    /// with the integration.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Where an unrecognized type tag was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeContext {
    Property,
    Formula,
    Rollup,
    Block,
}

impl fmt::Display for TypeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Formula => write!(f, "formula"),
            Self::Rollup => write!(f, "rollup"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid Notion identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Notion token not found: {0}")]
    MissingCredential(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid value for property '{property}': {reason}")]
    InvalidPropertyShape { property: String, reason: String },

    #[error("Block tree nests deeper than {limit} levels")]
    MalformedTree { limit: usize },

    #[error("API Error {status} ({code}): {message}")]
    RemoteRequestFailed {
        status: u16,
        code: NotionErrorCode,
        message: String,
        body: String,
    },

    #[error("Unrecognized {context} type '{tag}'")]
    UnrecognizedType { context: TypeContext, tag: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    /// Shorthand for an `UnrecognizedType` error.
    pub fn unrecognized(context: TypeContext, tag: impl Into<String>) -> Self {
        Self::UnrecognizedType {
            context,
            tag: tag.into(),
        }
    }

    /// A follow-up suggestion printed under the error, when one helps.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RemoteRequestFailed { code, .. } if code.is_not_found() => Some(
                "check the ID and that the page or database is shared with your integration",
            ),
            Self::MissingCredential(_) => {
                Some("create an integration at https://www.notion.so/my-integrations")
            }
            _ => None,
        }
    }

    /// Shorthand for an `InvalidPropertyShape` error.
    pub fn shape(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPropertyShape {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::MalformedResponse(format!("formatting error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<crate::types::ValidationError> for AppError {
    fn from(err: crate::types::ValidationError) -> Self {
        use crate::types::ValidationError;

        match err {
            ValidationError::InvalidId(msg) => AppError::InvalidIdentifier(msg),
            ValidationError::InvalidApiKey { reason } => AppError::MissingCredential(reason),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in ["object_not_found", "validation_error", "rate_limited"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new"),
            NotionErrorCode::Unknown("brand_new".to_string())
        );
    }

    #[test]
    fn not_found_failures_suggest_sharing() {
        let not_found = AppError::RemoteRequestFailed {
            status: 404,
            code: NotionErrorCode::from_http_status(404),
            message: "Not Found".to_string(),
            body: String::new(),
        };
        assert!(not_found.hint().unwrap().contains("shared with your integration"));

        let server_error = AppError::RemoteRequestFailed {
            status: 500,
            code: NotionErrorCode::InternalError,
            message: "boom".to_string(),
            body: String::new(),
        };
        assert_eq!(server_error.hint(), None);
    }

    #[test]
    fn remote_failure_message_names_status_and_code() {
        let err = AppError::RemoteRequestFailed {
            status: 404,
            code: NotionErrorCode::ObjectNotFound,
            message: "Could not find page".to_string(),
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "API Error 404 (object_not_found): Could not find page"
        );
    }

    #[test]
    fn unrecognized_type_names_the_tag() {
        let err = AppError::unrecognized(TypeContext::Property, "hologram");
        assert_eq!(err.to_string(), "Unrecognized property type 'hologram'");
    }
}
