// src/api/parser.rs
//! Turns raw transport responses into typed values or `RemoteRequestFailed`.

use super::responses::ErrorBody;
use super::types::ApiResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use serde::de::DeserializeOwned;

/// Parses a response body as `T` when the status is 2xx, or as an API error.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if result.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(result))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Builds the failure from a non-2xx response.
///
/// A Notion error body supplies the code and message; any other body is kept
/// as a preview and the status stands in for the code.
fn parse_error(result: ApiResponse<String>) -> AppError {
    let body = preview(&result.data);
    log::debug!("HTTP {} from {}: {}", result.status, result.url, body);

    match serde_json::from_str::<ErrorBody>(&result.data) {
        Ok(error) => AppError::RemoteRequestFailed {
            status: result.status,
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            body,
        },
        Err(_) => AppError::RemoteRequestFailed {
            status: result.status,
            code: NotionErrorCode::from_http_status(result.status),
            message: if body.is_empty() {
                format!("HTTP {} from {}", result.status, result.url)
            } else {
                body.clone()
            },
            body,
        },
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
