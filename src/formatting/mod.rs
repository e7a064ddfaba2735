// src/formatting/mod.rs
//! Renders wolai blocks into Markdown/HTML output nodes and serializes them.

pub mod block_renderer;
pub mod context;
pub mod output_tree;
mod rich_text;

pub use block_renderer::render_block;
pub use context::{ChildPage, ConversionContext, ImageAsset};
pub use output_tree::{serialize, BlockContent};
pub use rich_text::render_rich_text;
