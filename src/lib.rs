// src/lib.rs
//! wolai2markdown library: converts wolai page trees into Markdown files.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ExitStatus`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`, `RetryPolicy`
//! - **Domain model**: `Block`, `BlockKind`, `RichTextRun`, etc.
//! - **API client**: `WolaiRepository`, `WolaiHttpClient`, parsers
//! - **Conversion**: `PageConverter`, `render_block`, `render_rich_text`, `serialize`
//! - **Output**: `ExportPipeline`, `AssetSource`, delivery plans

mod api;
mod config;
mod constants;
mod crawler;
mod error;
mod error_recovery;
mod formatting;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{classify_fetch_failure, AppError, ExitStatus, FetchFailure, WolaiErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{usage_exit_status, CommandLineInput, PipelineConfig};
pub use crate::error_recovery::{retry_on_rate_limit, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{plain_text, Block, BlockKind, Dimensions, MediaRef, RichTextRun, StyledText};

// --- Domain Types ---
pub use crate::types::{ApiToken, BlockId, ColorLayer};

// --- API Client ---
pub use crate::api::{
    adapter::convert_block,
    parser::{parse_block_response, parse_children_response},
    responses::{PaginatedResponse, RawBlock, WolaiError},
    ApiResponse, WolaiHttpClient, WolaiRepository,
};

// --- Conversion ---
pub use crate::crawler::PageConverter;
pub use crate::formatting::{
    render_block, render_rich_text, serialize, BlockContent, ChildPage, ConversionContext,
    ImageAsset,
};

// --- Output ---
pub use crate::output::{
    deliver, detect_media_format, download_assets, substitute_placeholders, AssetSource,
    DeliveryTarget, FetchedAsset, HttpAssetSource, MediaFormat, OutputPlan, OutputReport,
    ResolvedAsset,
};
pub use crate::pipeline::{ExportPipeline, ExportSummary};
