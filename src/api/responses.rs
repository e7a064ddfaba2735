// src/api/responses.rs
//! Wire types for wolai open API responses.
//!
//! Every type-specific field is optional here; `api::adapter` decides which
//! fields a block's declared type requires.

use crate::model::rich_text::deserialize_runs;
use crate::model::RichTextRun;
use serde::Deserialize;

/// `GET blocks/{id}/children`
#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenResponse {
    #[serde(default)]
    pub data: Vec<RawBlock>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// `GET blocks/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub data: RawBlock,
}

/// Error body returned with any non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct WolaiError {
    #[serde(default)]
    pub message: String,
    pub error_code: u32,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// A block exactly as the API reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, deserialize_with = "deserialize_runs")]
    pub content: Vec<RichTextRun>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub language: Option<String>,
    /// A plain string for code blocks; rich text on some other block types.
    #[serde(default)]
    pub caption: Option<serde_json::Value>,
    #[serde(default)]
    pub media: Option<RawMedia>,
    #[serde(default)]
    pub dimensions: Option<RawDimensions>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub icon: Option<RawIcon>,
    #[serde(default)]
    pub embed_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMedia {
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawDimensions {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIcon {
    #[serde(rename = "type", default)]
    pub icon_type: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One page of a paginated listing, already converted to the domain model.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}
