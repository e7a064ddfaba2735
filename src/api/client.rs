// src/api/client.rs
//! Thin HTTP client for the wolai open API.
//!
//! Handles authentication and raw request/response plumbing; parsing lives
//! in `api::parser`.

use super::pagination::fetch_all_pages;
use super::parser::{parse_block_response, parse_children_response};
use crate::constants::WOLAI_API_BASE_URL;
use crate::error::AppError;
use crate::model::Block;
use crate::types::{ApiToken, BlockId};
use reqwest::{header, Client, Response};
use url::Url;

/// A reqwest client preconfigured with the wolai token.
#[derive(Clone)]
pub struct WolaiHttpClient {
    client: Client,
    base_url: String,
}

impl WolaiHttpClient {
    /// Creates a new HTTP client authenticated with `token`.
    pub fn new(token: &ApiToken) -> Result<Self, AppError> {
        Self::with_base_url(token, WOLAI_API_BASE_URL)
    }

    /// Creates a client against another API root (self-hosted or test servers).
    pub fn with_base_url(token: &ApiToken, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// wolai expects the bare token in `Authorization`, without a scheme.
    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(token.as_str()).map_err(|e| {
            AppError::InvalidParameter(format!("Invalid API token format: {}", e))
        })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds the full URL for an endpoint plus query parameters.
    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base_url, endpoint);
        Url::parse_with_params(&raw, query)
            .map_err(|e| AppError::InvalidParameter(format!("Invalid request URL {}: {}", raw, e)))
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint, query)?;
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::trace!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::WolaiRepository for WolaiHttpClient {
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, AppError> {
        let endpoint = format!("blocks/{}", id.as_str());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parse_block_response(result)
    }

    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.as_str());
        let pagination = fetch_all_pages(
            |page_size, cursor| {
                let client = self.clone();
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = client.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parse_children_response(result)
                }
            },
            None,
        )
        .await?;

        log::debug!(
            "Block {} has {} children across {} page(s)",
            parent,
            pagination.items.len(),
            pagination.pages_fetched
        );
        Ok(pagination.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
