// src/formatting/context.rs
//! Per-page conversion state: footnotes, discovered child pages, images,
//! and the rendered node list.
//!
//! A context is created for one page, filled during that page's single
//! render pass, handed to the asset and file collaborators, then dropped.

use super::output_tree::{serialize, BlockContent};
use crate::constants::{ASSETS_DIR_NAME, PAGE_FILE_NAME};
use crate::output::paths::sanitize_dir_name;
use crate::types::BlockId;
use indexmap::IndexMap;

/// A page found on the current page, to be converted after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPage {
    /// Rendered title, or the untitled fallback.
    pub title: String,
    /// Directory (relative to the current page's) the child is written to.
    pub dir_name: String,
}

/// An image found on the current page, to be downloaded after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub source_url: String,
    /// Short local name; the page text carries it as `[placeholder]`.
    pub placeholder: String,
}

impl ImageAsset {
    /// The literal token written into the page text for this image.
    pub fn token(&self) -> String {
        format!("[{}]", self.placeholder)
    }
}

/// Mutable accumulator for one page conversion.
#[derive(Debug, Default)]
pub struct ConversionContext {
    footnotes: Vec<String>,
    child_pages: IndexMap<BlockId, ChildPage>,
    images: Vec<ImageAsset>,
    result: Vec<BlockContent>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Footnote registry ---

    /// Claims the next footnote number before its body is rendered.
    ///
    /// The slot is held empty until [`fill_footnote`](Self::fill_footnote), so
    /// footnotes met while rendering the body are numbered after this one.
    pub fn reserve_footnote(&mut self) -> usize {
        self.footnotes.push(String::new());
        self.footnotes.len()
    }

    /// Stores the rendered body for a number returned by `reserve_footnote`.
    pub fn fill_footnote(&mut self, number: usize, body: String) {
        match number
            .checked_sub(1)
            .and_then(|index| self.footnotes.get_mut(index))
        {
            Some(slot) => *slot = body,
            None => log::warn!("Footnote [^{}] was never reserved; body dropped", number),
        }
    }

    pub fn footnotes(&self) -> &[String] {
        &self.footnotes
    }

    // --- Child page registry ---

    /// Records a child page and picks its output directory.
    ///
    /// Directory names are unique within one page, compared ASCII
    /// case-insensitively. A title whose directory is already taken, or that
    /// collides with the page file or the assets directory, gets the block ID
    /// appended, then a counter if that is taken too.
    pub fn register_child_page(&mut self, id: &BlockId, title: &str) -> &ChildPage {
        let base = sanitize_dir_name(title);
        let taken = |name: &str| {
            name.eq_ignore_ascii_case(ASSETS_DIR_NAME)
                || name.eq_ignore_ascii_case(PAGE_FILE_NAME)
                || self.child_pages.iter().any(|(other_id, page)| {
                    other_id != id && page.dir_name.eq_ignore_ascii_case(name)
                })
        };

        let dir_name = if taken(&base) {
            let suffixed = format!("{}-{}", base, id.as_str());
            let mut unique = suffixed.clone();
            let mut counter = 2;
            while taken(&unique) {
                unique = format!("{}-{}", suffixed, counter);
                counter += 1;
            }
            log::warn!(
                "Child page title '{}' is already used on this page, writing it to '{}'",
                title,
                unique
            );
            unique
        } else {
            base
        };

        let entry = self.child_pages.entry(id.clone()).or_insert(ChildPage {
            title: String::new(),
            dir_name: String::new(),
        });
        entry.title = title.to_string();
        entry.dir_name = dir_name;
        entry
    }

    pub fn child_pages(&self) -> &IndexMap<BlockId, ChildPage> {
        &self.child_pages
    }

    // --- Image asset registry ---

    /// Assigns the next placeholder name to an image source.
    ///
    /// Every call adds an entry, even for a URL already registered.
    pub fn register_image(&mut self, source_url: &str) -> &ImageAsset {
        let placeholder = format!("image{}", self.images.len());
        self.images.push(ImageAsset {
            source_url: source_url.to_string(),
            placeholder,
        });
        let last = self.images.len() - 1;
        &self.images[last]
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    // --- Rendered output ---

    pub fn push_node(&mut self, node: BlockContent) {
        self.result.push(node);
    }

    pub fn result(&self) -> &[BlockContent] {
        &self.result
    }

    /// Serializes the rendered nodes into the page's final text.
    pub fn render_document(&self) -> String {
        serialize(&self.result, "")
    }
}
