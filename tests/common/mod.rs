// tests/common/mod.rs
//! Shared fixtures: a recording in-memory transport and canned API bodies.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_cli::{ApiKey, ApiRequest, ApiResponse, AppError, CredentialSources, HttpMethod, NotionTransport};
use serde_json::{json, Value};
use std::sync::Mutex;

pub const PAGE_HEX: &str = "0123456789abcdef0123456789abcdef";
pub const PAGE_ID: &str = "01234567-89ab-cdef-0123-456789abcdef";

/// Transport double: answers from a route table and records every request.
///
/// Routes match on method and exact endpoint; unmatched requests get a 404
/// Notion error body.
pub struct MockTransport {
    routes: Vec<(HttpMethod, String, u16, String)>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, method: HttpMethod, endpoint: &str, status: u16, body: Value) -> Self {
        self.routes
            .push((method, endpoint.to_string(), status, body.to_string()));
        self
    }

    /// A route whose body is not JSON.
    pub fn route_text(mut self, method: HttpMethod, endpoint: &str, status: u16, body: &str) -> Self {
        self.routes
            .push((method, endpoint.to_string(), status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl NotionTransport for MockTransport {
    async fn send(
        &self,
        _token: &ApiKey,
        request: &ApiRequest,
    ) -> Result<ApiResponse<String>, AppError> {
        self.requests.lock().unwrap().push(request.clone());

        let (status, data) = self
            .routes
            .iter()
            .find(|(method, endpoint, _, _)| *method == request.method && *endpoint == request.endpoint)
            .map(|(_, _, status, body)| (*status, body.clone()))
            .unwrap_or_else(|| {
                (
                    404,
                    json!({"object": "error", "status": 404, "code": "object_not_found", "message": "no route"})
                        .to_string(),
                )
            });

        Ok(ApiResponse {
            data,
            status,
            url: format!("mock://{}", request.endpoint),
        })
    }
}

pub fn test_credentials() -> CredentialSources {
    CredentialSources::new(Some("ntn_test_token".to_string()), Vec::new())
}

// --- Canned bodies ---

pub fn page_body() -> Value {
    json!({
        "object": "page",
        "id": PAGE_ID,
        "url": format!("https://www.notion.so/Roadmap-{}", PAGE_HEX),
        "created_time": "2024-03-01T09:30:00.000Z",
        "last_edited_time": "2024-03-02T10:00:00.000Z",
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"plain_text": "Roadmap"}]},
            "Priority": {"id": "p", "type": "select", "select": {"name": "High"}},
            "Due": {"id": "d", "type": "date", "date": {"start": "2024-04-01", "end": null}}
        }
    })
}

pub fn blocks_body() -> Value {
    json!({
        "object": "list",
        "results": [
            {"object": "block", "id": "b1", "type": "heading_2",
             "heading_2": {"rich_text": [{"plain_text": "Goals"}]}},
            {"object": "block", "id": "b2", "type": "to_do",
             "to_do": {"rich_text": [{"plain_text": "Ship it"}], "checked": false}}
        ],
        "next_cursor": null,
        "has_more": false
    })
}

pub fn comments_body() -> Value {
    json!({
        "object": "list",
        "results": [{
            "object": "comment",
            "id": "c1",
            "created_time": "2024-03-03T08:15:00.000Z",
            "created_by": {"object": "user", "id": "9f8e7d6c-0000-0000-0000-000000000000"},
            "rich_text": [{"plain_text": "Nice plan"}]
        }],
        "has_more": false
    })
}
