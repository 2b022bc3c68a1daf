// src/api/mod.rs
//! Notion API interaction.
//!
//! `NotionTransport` is the seam between the verbs and the network: the
//! binary uses [`HttpTransport`], tests inject a recording double. Everything
//! above it (`NotionApi`) builds requests and parses responses as pure data.

pub mod client;
pub mod parser;
pub mod responses;
pub mod types;

use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use responses::{BlockList, CommentList, CommentObject, NotionObject, PageList};
use serde_json::{json, Value};

pub use client::HttpTransport;
pub use types::{ApiRequest, ApiResponse, HttpMethod};

/// The ability to deliver one request to the Notion API.
///
/// Implementations return every response, successful or not; status
/// interpretation belongs to the parser.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn send(
        &self,
        token: &ApiKey,
        request: &ApiRequest,
    ) -> Result<ApiResponse<String>, AppError>;
}

/// Typed Notion endpoints over a transport and an authenticated token.
pub struct NotionApi<'a, T: NotionTransport + ?Sized> {
    transport: &'a T,
    token: &'a ApiKey,
}

impl<'a, T: NotionTransport + ?Sized> NotionApi<'a, T> {
    pub fn new(transport: &'a T, token: &'a ApiKey) -> Self {
        Self { transport, token }
    }

    async fn call<R>(&self, request: ApiRequest) -> Result<R, AppError>
    where
        R: serde::de::DeserializeOwned,
    {
        log::debug!("Request: {}", request);
        let response = self.transport.send(self.token, &request).await?;
        parser::parse_api_response(response)
    }

    pub async fn retrieve_page(&self, id: &NotionId) -> Result<NotionObject, AppError> {
        self.call(ApiRequest::get(format!("pages/{}", id))).await
    }

    pub async fn retrieve_database(&self, id: &NotionId) -> Result<NotionObject, AppError> {
        self.call(ApiRequest::get(format!("databases/{}", id))).await
    }

    /// Lists one page of a block's children, each with its nested children
    /// left as returned.
    pub async fn list_block_children(
        &self,
        id: &NotionId,
        page_size: u32,
    ) -> Result<Vec<Value>, AppError> {
        let request =
            ApiRequest::get(format!("blocks/{}/children", id)).with_query("page_size", page_size);
        let list: BlockList = self.call(request).await?;
        warn_if_truncated("blocks", list.has_more, list.results.len());
        Ok(list.results)
    }

    pub async fn list_comments(&self, id: &NotionId) -> Result<Vec<CommentObject>, AppError> {
        let request = ApiRequest::get("comments").with_query("block_id", id);
        let list: CommentList = self.call(request).await?;
        warn_if_truncated("comments", list.has_more, list.results.len());
        Ok(list.results)
    }

    pub async fn create_comment(
        &self,
        page: &NotionId,
        rich_text: Vec<Value>,
    ) -> Result<CommentObject, AppError> {
        let body = json!({
            "parent": { "page_id": page.as_str() },
            "rich_text": rich_text,
        });
        self.call(ApiRequest::post("comments", body)).await
    }

    /// Sends a `{"properties": {...}}` body built by the property codec.
    pub async fn update_page(&self, id: &NotionId, payload: Value) -> Result<NotionObject, AppError> {
        self.call(ApiRequest::patch(format!("pages/{}", id), payload))
            .await
    }

    /// Queries one page of rows; the filter is passed through untouched.
    pub async fn query_database(
        &self,
        id: &NotionId,
        filter: Option<&Value>,
        page_size: u32,
    ) -> Result<Vec<NotionObject>, AppError> {
        let mut body = json!({ "page_size": page_size });
        if let Some(filter) = filter {
            body["filter"] = filter.clone();
        }
        let list: PageList = self
            .call(ApiRequest::post(format!("databases/{}/query", id), body))
            .await?;
        warn_if_truncated("rows", list.has_more, list.results.len());
        Ok(list.results)
    }

    pub async fn search(&self, query: &str, page_size: u32) -> Result<Vec<NotionObject>, AppError> {
        let body = json!({ "query": query, "page_size": page_size });
        let list: PageList = self.call(ApiRequest::post("search", body)).await?;
        warn_if_truncated("results", list.has_more, list.results.len());
        Ok(list.results)
    }
}

/// Only one page is ever fetched; say so when more exist.
fn warn_if_truncated(what: &str, has_more: bool, shown: usize) {
    if has_more {
        log::warn!(
            "Showing the first {} {}; more exist (raise --page-size to see more)",
            shown,
            what
        );
    }
}
