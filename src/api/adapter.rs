// src/api/adapter.rs
//! Converts wire blocks into the typed domain model.
//!
//! A block whose declared type needs a field the response lacks becomes
//! `BlockKind::Malformed`; the renderer decides how to show it.

use super::responses::{RawBlock, RawDimensions, RawIcon, RawMedia};
use crate::model::{plain_text, Block, BlockKind, Dimensions, MediaRef, RichTextRun};
use crate::types::BlockId;

/// Converts one wire block into a domain block.
pub fn convert_block(raw: RawBlock) -> Block {
    let RawBlock {
        id,
        block_type,
        content,
        level,
        language,
        caption,
        media,
        dimensions,
        checked,
        icon,
        embed_link,
    } = raw;

    let malformed = |missing: &'static str| BlockKind::Malformed {
        block_type: block_type.clone(),
        missing,
    };

    let kind = match block_type.as_str() {
        "text" => BlockKind::Text { content },
        "heading" => match level {
            Some(level) if level > 0 => BlockKind::Heading {
                level: level.min(6),
                content,
            },
            _ => malformed("level"),
        },
        "code" => match first_title(&content) {
            Some(source) => BlockKind::Code {
                language: language.filter(|l| !l.trim().is_empty()),
                caption: caption.as_ref().and_then(caption_text),
                source,
            },
            None => malformed("content"),
        },
        "quote" => BlockKind::Quote { content },
        "enum_list" => BlockKind::EnumList { content },
        "bull_list" => BlockKind::BullList { content },
        "todo_list" => BlockKind::TodoList {
            content,
            checked: checked.unwrap_or(false),
        },
        "divider" => BlockKind::Divider,
        "image" => match media.and_then(convert_media) {
            Some(media) => BlockKind::Image {
                media,
                dimensions: dimensions.and_then(convert_dimensions),
            },
            None => malformed("media"),
        },
        "callout" => BlockKind::Callout {
            icon: icon.and_then(convert_icon),
            content,
        },
        "block_equation" => match first_title(&content) {
            Some(source) => BlockKind::BlockEquation { source },
            None => malformed("content"),
        },
        "embed" => match embed_link.filter(|link| !link.is_empty()) {
            Some(link) => BlockKind::Embed { link },
            None => malformed("embed_link"),
        },
        "page" => BlockKind::Page { content },
        _ => BlockKind::Unsupported {
            block_type: block_type.clone(),
        },
    };

    Block {
        id: BlockId::from_api(id),
        kind,
    }
}

/// Code and block equations keep their first run's title verbatim.
fn first_title(content: &[RichTextRun]) -> Option<String> {
    content.first().map(|run| run.title().to_string())
}

fn convert_media(media: RawMedia) -> Option<MediaRef> {
    match media.media_type.as_str() {
        "internal" => media
            .download_url
            .map(|download_url| MediaRef::Internal { download_url }),
        "external" => media.url.map(|url| MediaRef::External { url }),
        other => {
            log::debug!("Unknown media type '{}', trying any available URL", other);
            media
                .download_url
                .map(|download_url| MediaRef::Internal { download_url })
                .or_else(|| media.url.map(|url| MediaRef::External { url }))
        }
    }
}

fn convert_dimensions(raw: RawDimensions) -> Option<Dimensions> {
    Some(Dimensions {
        width: raw.width?,
        height: raw.height?,
    })
}

fn convert_icon(raw: RawIcon) -> Option<String> {
    if let Some(kind) = &raw.icon_type {
        log::trace!("Callout icon type: {}", kind);
    }
    raw.icon.filter(|icon| !icon.is_empty())
}

fn caption_text(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(_) => {
            let runs: Vec<RichTextRun> = serde_json::from_value(value.clone()).ok()?;
            plain_text(&runs)
        }
        _ => return None,
    };
    Some(text).filter(|t| !t.trim().is_empty())
}
