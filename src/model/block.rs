use super::rich_text::RichTextRun;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// One node of a wolai page's content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
}

/// Block type together with the fields that type requires.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text {
        content: Vec<RichTextRun>,
    },
    Heading {
        level: u8,
        content: Vec<RichTextRun>,
    },
    Code {
        language: Option<String>,
        caption: Option<String>,
        source: String,
    },
    Quote {
        content: Vec<RichTextRun>,
    },
    EnumList {
        content: Vec<RichTextRun>,
    },
    BullList {
        content: Vec<RichTextRun>,
    },
    TodoList {
        content: Vec<RichTextRun>,
        checked: bool,
    },
    Divider,
    Image {
        media: MediaRef,
        dimensions: Option<Dimensions>,
    },
    Callout {
        icon: Option<String>,
        content: Vec<RichTextRun>,
    },
    BlockEquation {
        source: String,
    },
    Embed {
        link: String,
    },
    Page {
        content: Vec<RichTextRun>,
    },
    /// A block type this exporter does not render.
    Unsupported {
        block_type: String,
    },
    /// A known block type missing a field its type requires.
    Malformed {
        block_type: String,
        missing: &'static str,
    },
}

/// Where an image's bytes live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaRef {
    /// Uploaded to wolai; fetched through a signed download URL.
    Internal { download_url: String },
    /// Hotlinked from elsewhere.
    External { url: String },
}

impl MediaRef {
    pub fn source_url(&self) -> &str {
        match self {
            MediaRef::Internal { download_url } => download_url,
            MediaRef::External { url } => url,
        }
    }
}

/// Display size an image was given in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: BlockId::from_api(id),
            kind,
        }
    }

    /// The wire name of the block's type.
    pub fn block_type(&self) -> &str {
        match &self.kind {
            BlockKind::Text { .. } => "text",
            BlockKind::Heading { .. } => "heading",
            BlockKind::Code { .. } => "code",
            BlockKind::Quote { .. } => "quote",
            BlockKind::EnumList { .. } => "enum_list",
            BlockKind::BullList { .. } => "bull_list",
            BlockKind::TodoList { .. } => "todo_list",
            BlockKind::Divider => "divider",
            BlockKind::Image { .. } => "image",
            BlockKind::Callout { .. } => "callout",
            BlockKind::BlockEquation { .. } => "block_equation",
            BlockKind::Embed { .. } => "embed",
            BlockKind::Page { .. } => "page",
            BlockKind::Unsupported { block_type } | BlockKind::Malformed { block_type, .. } => {
                block_type
            }
        }
    }
}
