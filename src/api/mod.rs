// src/api/mod.rs
//! wolai API interaction: retrieving blocks from a workspace.
//!
//! I/O (`client`), wire parsing (`parser`, `responses`) and conversion into
//! the domain model (`adapter`) are kept apart; the crawler only sees the
//! [`WolaiRepository`] trait.

pub mod adapter;
pub mod client;
mod pagination;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;

/// The ability to retrieve content from a wolai workspace.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait WolaiRepository: Send + Sync {
    /// Fetches a single block, pages included.
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, AppError>;

    /// Fetches every direct child of `parent`, in document order.
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError>;
}

pub use client::{ApiResponse, WolaiHttpClient};
pub use pagination::{fetch_all_pages, PaginationResult};
