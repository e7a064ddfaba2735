// tests/common/mod.rs
//! In-memory wolai workspace and asset server shared by the integration tests.

#![allow(dead_code)]

use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use wolai2markdown::{
    AppError, AssetSource, Block, BlockId, BlockKind, FetchedAsset, RichTextRun, WolaiErrorCode,
    WolaiRepository,
};

/// A failure the fake workspace returns before serving the real answer.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    RateLimited,
    TokenInvalid,
    PermissionDenied,
}

impl Scripted {
    fn into_error(self) -> AppError {
        let (code, status) = match self {
            Scripted::RateLimited => (WolaiErrorCode::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            Scripted::TokenInvalid => (WolaiErrorCode::TokenInvalid, StatusCode::UNAUTHORIZED),
            Scripted::PermissionDenied => (WolaiErrorCode::PermissionDenied, StatusCode::FORBIDDEN),
        };
        AppError::WolaiService {
            code,
            message: format!("{:?}", self),
            status,
        }
    }
}

/// Blocks and children keyed by block ID.
#[derive(Default)]
pub struct FakeWorkspace {
    blocks: HashMap<String, Block>,
    children: HashMap<String, Vec<Block>>,
    failures: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page block, retrievable through `retrieve_block`.
    pub fn with_page(mut self, id: &str, title: &str) -> Self {
        self.blocks.insert(id.to_string(), page(id, title));
        self
    }

    pub fn with_children(mut self, parent: &str, children: Vec<Block>) -> Self {
        self.children.insert(parent.to_string(), children);
        self
    }

    /// Queues failures returned by the next fetches of `id`.
    pub fn failing(self, id: &str, failures: &[Scripted]) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(id.to_string(), failures.iter().copied().collect());
        self
    }

    /// Every fetch made so far, as `block:<id>` or `children:<id>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_failure(&self, id: &str) -> Option<AppError> {
        self.failures
            .lock()
            .unwrap()
            .get_mut(id)
            .and_then(VecDeque::pop_front)
            .map(Scripted::into_error)
    }
}

#[async_trait::async_trait]
impl WolaiRepository for FakeWorkspace {
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, AppError> {
        self.calls.lock().unwrap().push(format!("block:{}", id));
        if let Some(err) = self.next_failure(id.as_str()) {
            return Err(err);
        }
        self.blocks
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no block {}", id)))
    }

    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        self.calls.lock().unwrap().push(format!("children:{}", parent));
        if let Some(err) = self.next_failure(parent.as_str()) {
            return Err(err);
        }
        Ok(self.children.get(parent.as_str()).cloned().unwrap_or_default())
    }
}

/// Serves fixed bytes per URL; unknown URLs fail.
#[derive(Default)]
pub struct FakeAssets {
    served: HashMap<String, FetchedAsset>,
}

impl FakeAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(mut self, url: &str, content_type: Option<&str>, bytes: &[u8]) -> Self {
        self.served.insert(
            url.to_string(),
            FetchedAsset {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl AssetSource for FakeAssets {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AppError> {
        self.served
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("404 for {}", url)))
    }
}

// --- Block builders ---

pub fn text(id: &str, body: &str) -> Block {
    Block::new(
        id,
        BlockKind::Text {
            content: vec![RichTextRun::plain(body)],
        },
    )
}

pub fn enum_item(id: &str, body: &str) -> Block {
    Block::new(
        id,
        BlockKind::EnumList {
            content: vec![RichTextRun::plain(body)],
        },
    )
}

pub fn bullet(id: &str, body: &str) -> Block {
    Block::new(
        id,
        BlockKind::BullList {
            content: vec![RichTextRun::plain(body)],
        },
    )
}

pub fn page(id: &str, title: &str) -> Block {
    Block::new(
        id,
        BlockKind::Page {
            content: vec![RichTextRun::plain(title)],
        },
    )
}

/// The anchored paragraph lines a non-list block renders to.
pub fn anchored(id: &str, lines: &[&str]) -> String {
    let mut out = format!("<p id=\"{}\">\n\n", id);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("\n</p>\n");
    out
}
