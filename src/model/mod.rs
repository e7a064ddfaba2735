// src/model/mod.rs
//! Domain model for wolai content: blocks and their inline rich text.
//!
//! These types are what the rest of the crate works with. Wire formats live
//! in `api::responses` and are converted into this model by `api::adapter`.

mod block;
pub mod rich_text;

pub use block::{Block, BlockKind, Dimensions, MediaRef};
pub use rich_text::{plain_text, RichTextRun, StyledText};
