// src/api/parser.rs
//! Turns raw HTTP responses into domain values or typed API errors.

use super::adapter::convert_block;
use super::client::ApiResponse;
use super::responses::{BlockResponse, ChildrenResponse, PaginatedResponse, WolaiError};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, WolaiErrorCode};
use crate::model::Block;
use reqwest::StatusCode;

/// Parse any wolai API response: the success body into `T`, anything else
/// into an `AppError::WolaiService`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(error) = serde_json::from_str::<WolaiError>(body) {
        log::debug!(
            "wolai error {} (HTTP {}) from {}: {}",
            error.error_code,
            error.status_code.unwrap_or(status.as_u16()),
            url,
            error.message
        );
        return AppError::WolaiService {
            code: WolaiErrorCode::from_api_code(error.error_code),
            message: error.message,
            status,
        };
    }

    AppError::WolaiService {
        code: WolaiErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let cut = (0..=ERROR_BODY_PREVIEW_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

/// Parse a single block response.
pub fn parse_block_response(result: ApiResponse<String>) -> Result<Block, AppError> {
    let response: BlockResponse = parse_api_response(result)?;
    Ok(convert_block(response.data))
}

/// Parse one page of a block's children.
pub fn parse_children_response(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: ChildrenResponse = parse_api_response(result)?;
    Ok(PaginatedResponse {
        results: response.data.into_iter().map(convert_block).collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}
