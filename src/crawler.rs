// src/crawler.rs
//! Walks a wolai page's block tree and renders it.
//!
//! One page is converted depth-first, one fetch at a time, so output order
//! always equals document order. Child pages are only recorded here; the
//! export driver converts them afterwards.

use crate::api::WolaiRepository;
use crate::constants::UNTITLED_PAGE_PREFIX;
use crate::error::AppError;
use crate::error_recovery::{retry_on_rate_limit, RetryPolicy};
use crate::formatting::{render_block, BlockContent, ConversionContext};
use crate::model::{plain_text, Block, BlockKind};
use crate::types::BlockId;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Converts pages fetched through a [`WolaiRepository`].
#[derive(Clone)]
pub struct PageConverter {
    client: Arc<dyn WolaiRepository>,
    retry: RetryPolicy,
}

impl PageConverter {
    pub fn new(client: Arc<dyn WolaiRepository>, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Converts one page into a filled conversion context.
    ///
    /// The result starts with a `# title` heading, followed by every direct
    /// child of the page (list children nested inside their container) and
    /// then the footnote definitions.
    pub async fn convert_page(
        &self,
        page_id: &BlockId,
        title: &str,
    ) -> Result<ConversionContext, AppError> {
        let mut ctx = ConversionContext::new();
        ctx.push_node(BlockContent::leaf([format!("# {}", title)]));

        let blocks = self.fetch_children(page_id).await?;
        for block in &blocks {
            let node = self.render_with_children(block, &mut ctx).await?;
            ctx.push_node(node.with_trailing_blank());
        }

        let definitions: Vec<BlockContent> = ctx
            .footnotes()
            .iter()
            .enumerate()
            .map(|(index, body)| {
                BlockContent::leaf([String::new(), format!("[^{}]: {}", index + 1, body), String::new()])
            })
            .collect();
        for definition in definitions {
            ctx.push_node(definition);
        }

        log::debug!(
            "Converted page {}: {} top-level blocks, {} footnotes, {} child pages, {} images",
            page_id,
            blocks.len(),
            ctx.footnotes().len(),
            ctx.child_pages().len(),
            ctx.images().len()
        );
        Ok(ctx)
    }

    /// Fetches and renders every descendant of a container block.
    ///
    /// Leaf nodes get a trailing blank line; nested containers do not, so
    /// consecutive list items stay together.
    pub fn fetch_subtree<'a>(
        &'a self,
        block_id: &'a BlockId,
        ctx: &'a mut ConversionContext,
    ) -> BoxFuture<'a, Result<Vec<BlockContent>, AppError>> {
        Box::pin(async move {
            let blocks = self.fetch_children(block_id).await?;
            let mut nodes = Vec::with_capacity(blocks.len());
            for block in &blocks {
                let node = self.render_with_children(block, ctx).await?;
                nodes.push(if node.is_container() {
                    node
                } else {
                    node.with_trailing_blank()
                });
            }
            Ok(nodes)
        })
    }

    /// Looks up a page's own title, for pages converted as an export root.
    pub async fn resolve_title(&self, page_id: &BlockId) -> Result<String, AppError> {
        let block = retry_on_rate_limit(page_id, &self.retry, || {
            self.client.retrieve_block(page_id)
        })
        .await?;

        let title = match &block.kind {
            BlockKind::Page { content } => plain_text(content).trim().to_string(),
            _ => {
                log::warn!(
                    "Block {} is a {} block, not a page; converting its children anyway",
                    page_id,
                    block.block_type()
                );
                String::new()
            }
        };

        Ok(if title.is_empty() {
            format!("{}{}", UNTITLED_PAGE_PREFIX, page_id)
        } else {
            title
        })
    }

    async fn render_with_children(
        &self,
        block: &Block,
        ctx: &mut ConversionContext,
    ) -> Result<BlockContent, AppError> {
        let node = render_block(block, ctx);
        if node.is_container() {
            let children = self.fetch_subtree(&block.id, ctx).await?;
            Ok(node.with_children(children))
        } else {
            Ok(node)
        }
    }

    async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, AppError> {
        log::info!("fetching children of block: {}", block_id);
        retry_on_rate_limit(block_id, &self.retry, || {
            self.client.retrieve_children(block_id)
        })
        .await
    }
}
