// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names what went wrong and where. The conversion engine never
//! exits the process itself; `main` maps an `AppError` to an exit code.

use crate::constants::{
    WOLAI_CODE_PERMISSION_DENIED, WOLAI_CODE_RATE_LIMITED, WOLAI_CODE_TOKEN_INVALID,
};
use crate::types::BlockId;
use std::fmt;
use std::process::ExitCode;
use thiserror::Error;

/// wolai API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WolaiErrorCode {
    /// Access token is invalid or expired
    TokenInvalid,
    /// Token lacks permission for this block
    PermissionDenied,
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't classify
    Other(u32),
}

impl WolaiErrorCode {
    /// Parse a numeric wolai error code into the typed vocabulary.
    pub fn from_api_code(code: u32) -> Self {
        match code {
            WOLAI_CODE_TOKEN_INVALID => Self::TokenInvalid,
            WOLAI_CODE_PERMISSION_DENIED => Self::PermissionDenied,
            WOLAI_CODE_RATE_LIMITED => Self::RateLimited,
            other => Self::Other(other),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

impl fmt::Display for WolaiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenInvalid => write!(f, "{}", WOLAI_CODE_TOKEN_INVALID),
            Self::PermissionDenied => write!(f, "{}", WOLAI_CODE_PERMISSION_DENIED),
            Self::RateLimited => write!(f, "{}", WOLAI_CODE_RATE_LIMITED),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Process exit outcomes, one per class of fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    ParamError = 1,
    TokenError = 2,
    PermissionError = 3,
    OutputError = 4,
    UnknownError = 5,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("token is invalid")]
    TokenInvalid,

    #[error("failed to get content of block {block_id}: permission denied")]
    PermissionDenied { block_id: BlockId },

    #[error("failed to get content of block {block_id}: {detail}")]
    FetchFailed { block_id: BlockId, detail: String },

    #[error("failed to fetch block {block_id}: still rate limited after {attempts} attempts")]
    RateLimitExhausted { block_id: BlockId, attempts: u32 },

    #[error("wolai API returned an error ({code}): {message}")]
    WolaiService {
        code: WolaiErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },
}

impl AppError {
    /// The wolai error code carried by this error, if it came from the API.
    pub fn wolai_code(&self) -> Option<&WolaiErrorCode> {
        match self {
            AppError::WolaiService { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The exit outcome the CLI reports for this error.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            AppError::InvalidParameter(_) | AppError::Validation(_) => ExitStatus::ParamError,
            AppError::TokenInvalid => ExitStatus::TokenError,
            AppError::PermissionDenied { .. } => ExitStatus::PermissionError,
            AppError::Io(_) | AppError::DeliveryFailed { .. } => ExitStatus::OutputError,
            AppError::FetchFailed { .. }
            | AppError::RateLimitExhausted { .. }
            | AppError::WolaiService { .. }
            | AppError::NetworkFailure(_)
            | AppError::MalformedResponse(_) => ExitStatus::UnknownError,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// How a failed fetch should be handled by the crawler.
#[derive(Debug, PartialEq)]
pub enum FetchFailure {
    /// Wait and issue the identical request again.
    RateLimited,
    /// Stop the whole conversion: the token is unusable.
    TokenInvalid,
    /// Stop the whole conversion: the block is not readable with this token.
    PermissionDenied,
    /// Stop the whole conversion with the original detail.
    Unknown { detail: String },
}

/// Classifies a fetch error into the crawler's recovery vocabulary.
pub fn classify_fetch_failure(error: &AppError) -> FetchFailure {
    match error.wolai_code() {
        Some(code) if code.is_retryable() => FetchFailure::RateLimited,
        Some(WolaiErrorCode::TokenInvalid) => FetchFailure::TokenInvalid,
        Some(WolaiErrorCode::PermissionDenied) => FetchFailure::PermissionDenied,
        _ => match error {
            AppError::TokenInvalid => FetchFailure::TokenInvalid,
            AppError::PermissionDenied { .. } => FetchFailure::PermissionDenied,
            other => FetchFailure::Unknown {
                detail: other.to_string(),
            },
        },
    }
}
