// src/api/client.rs
//! HTTP transport over reqwest.
//!
//! Sends one request per call with the bearer token and the pinned
//! `Notion-Version` header. No retries and no status interpretation: the
//! parser decides what a status means.

use super::types::{ApiRequest, ApiResponse, HttpMethod};
use super::NotionTransport;
use crate::constants::{API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::types::ApiKey;
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Creates the headers for one request.
    fn create_headers(token: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingCredential(format!("token is not a valid header value: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl NotionTransport for HttpTransport {
    async fn send(
        &self,
        token: &ApiKey,
        request: &ApiRequest,
    ) -> Result<ApiResponse<String>, AppError> {
        let url = format!("{}/{}", self.base_url, request.endpoint);
        log::debug!("{} {}", request.method, url);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
        };
        let mut builder = builder
            .headers(Self::create_headers(token)?)
            .query(&request.query);
        if let Some(body) = &request.body {
            log::trace!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        log::debug!("{} {} -> {}", request.method, url, response.status());
        extract_response_text(response).await
    }
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
