// src/output/mod.rs
//! Output handling with planning separated from execution.
//!
//! Paths and asset links are computed by pure functions; `writer` is the
//! only place that touches the filesystem.

pub mod assets;
pub mod paths;
mod types;
mod writer;

pub use assets::{
    detect_media_format, download_assets, substitute_placeholders, AssetSource, FetchedAsset,
    HttpAssetSource, MediaFormat, ResolvedAsset,
};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
