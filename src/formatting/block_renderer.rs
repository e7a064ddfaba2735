// src/formatting/block_renderer.rs
//! Block rendering: one block in, one output node out.
//!
//! Rendering never fetches. List blocks come back as empty containers and
//! the crawler fills in their children; images and child pages are recorded
//! in the conversion context for the collaborators that run after it.

use super::context::ConversionContext;
use super::output_tree::BlockContent;
use super::rich_text::render_rich_text;
use crate::constants::{DEFAULT_CODE_LANGUAGE, UNTITLED_PAGE_PREFIX};
use crate::model::{Block, BlockKind, Dimensions, MediaRef, RichTextRun};
use crate::output::paths::child_page_link;
use crate::types::BlockId;

const MAX_HEADING_LEVEL: u8 = 6;

/// Renders a single block into its output node.
pub fn render_block(block: &Block, ctx: &mut ConversionContext) -> BlockContent {
    let lines = match &block.kind {
        BlockKind::EnumList { content } => {
            return BlockContent::container([format!("1. {}", render_rich_text(content, ctx))]);
        }
        BlockKind::BullList { content } => {
            return BlockContent::container([format!("- {}", render_rich_text(content, ctx))]);
        }
        BlockKind::TodoList { content, checked } => {
            let mark = if *checked { "x" } else { " " };
            return BlockContent::container([format!(
                "- [{}] {}",
                mark,
                render_rich_text(content, ctx)
            )]);
        }

        BlockKind::Code {
            language,
            caption,
            source,
        } => render_code(language.as_deref(), caption.as_deref(), source),
        BlockKind::Heading { level, content } => {
            let level = (*level).clamp(1, MAX_HEADING_LEVEL);
            vec![format!(
                "{} {}",
                "#".repeat(level as usize),
                render_rich_text(content, ctx)
            )]
        }
        BlockKind::Text { content } => vec![render_rich_text(content, ctx)],
        BlockKind::Quote { content } => vec![format!("> {}", render_rich_text(content, ctx))],
        BlockKind::Divider => vec!["---".to_string()],
        BlockKind::Image { media, dimensions } => vec![render_image(media, *dimensions, ctx)],
        BlockKind::Callout { icon, content } => vec![
            format!("::: tip {}", icon.as_deref().unwrap_or_default()),
            render_rich_text(content, ctx),
            ":::".to_string(),
        ],
        BlockKind::BlockEquation { source } => vec![format!("$${}$$", source)],
        BlockKind::Embed { link } => vec![format!(
            "<iframe src=\"{}\" width=\"100%\" style=\"border:none;\"></iframe>",
            link
        )],
        BlockKind::Page { content } => vec![render_page_link(&block.id, content, ctx)],
        BlockKind::Unsupported { block_type } => {
            log::debug!("Skipping unsupported {} block {}", block_type, block.id);
            Vec::new()
        }
        BlockKind::Malformed {
            block_type,
            missing,
        } => {
            log::warn!(
                "Skipping {} block {}: missing required field '{}'",
                block_type,
                block.id,
                missing
            );
            vec![format!(
                "<!-- skipped {} block {}: missing {} -->",
                block_type, block.id, missing
            )]
        }
    };

    BlockContent::Leaf {
        lines: wrap_in_anchor(&block.id, lines),
    }
}

/// Wraps a block's lines in a paragraph anchored at its ID, so bi-links
/// can target it.
fn wrap_in_anchor(id: &BlockId, lines: Vec<String>) -> Vec<String> {
    let mut wrapped = Vec::with_capacity(lines.len() + 4);
    wrapped.push(format!("<p id=\"{}\">", id));
    wrapped.push(String::new());
    wrapped.extend(lines);
    wrapped.push(String::new());
    wrapped.push("</p>".to_string());
    wrapped
}

fn render_code(language: Option<&str>, caption: Option<&str>, source: &str) -> Vec<String> {
    let language = language
        .filter(|lang| !lang.trim().is_empty())
        .unwrap_or(DEFAULT_CODE_LANGUAGE);

    let mut lines = vec![
        format!("```{}", language),
        source.to_string(),
        "```".to_string(),
    ];
    if let Some(caption) = caption.filter(|c| !c.trim().is_empty()) {
        lines.push(format!(
            "<div style=\"color:#838383;margin:-0.75rem 10px 0;\">{}</div>",
            caption
        ));
    }
    lines
}

fn render_image(
    media: &MediaRef,
    dimensions: Option<Dimensions>,
    ctx: &mut ConversionContext,
) -> String {
    let token = ctx.register_image(media.source_url()).token();
    match dimensions {
        Some(Dimensions { width, height }) => format!(
            "<img src=\"{}\" width=\"{}\" height=\"{}\">",
            token, width, height
        ),
        None => format!("<img src=\"{}\">", token),
    }
}

fn render_page_link(id: &BlockId, content: &[RichTextRun], ctx: &mut ConversionContext) -> String {
    let rendered = render_rich_text(content, ctx);
    let title = if rendered.trim().is_empty() {
        format!("{}{}", UNTITLED_PAGE_PREFIX, id)
    } else {
        rendered
    };

    let child = ctx.register_child_page(id, &title);
    format!("[{}]({})", title, child_page_link(&child.dir_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(kind: BlockKind) -> (BlockContent, ConversionContext) {
        let mut ctx = ConversionContext::new();
        let node = render_block(&Block::new("blockAAAA1", kind), &mut ctx);
        (node, ctx)
    }

    fn anchored(lines: &[&str]) -> Vec<String> {
        let mut expected = vec!["<p id=\"blockAAAA1\">".to_string(), String::new()];
        expected.extend(lines.iter().map(|l| l.to_string()));
        expected.push(String::new());
        expected.push("</p>".to_string());
        expected
    }

    #[test]
    fn test_heading() {
        let (node, _) = render(BlockKind::Heading {
            level: 2,
            content: vec![RichTextRun::plain("Intro")],
        });
        assert_eq!(node, BlockContent::Leaf { lines: anchored(&["## Intro"]) });
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let (node, _) = render(BlockKind::Heading {
            level: 9,
            content: vec![RichTextRun::plain("Deep")],
        });
        assert_eq!(node.lines()[2], "###### Deep");
    }

    #[test]
    fn test_code_without_language() {
        let (node, _) = render(BlockKind::Code {
            language: None,
            caption: None,
            source: "print(1)".into(),
        });
        assert_eq!(node.lines(), anchored(&["```plaintext", "print(1)", "```"]));
    }

    #[test]
    fn test_code_with_caption() {
        let (node, _) = render(BlockKind::Code {
            language: Some("rust".into()),
            caption: Some("main.rs".into()),
            source: "fn main() {}".into(),
        });
        insta::assert_snapshot!(node.lines().join("\n"), @r#"
        <p id="blockAAAA1">

        ```rust
        fn main() {}
        ```
        <div style="color:#838383;margin:-0.75rem 10px 0;">main.rs</div>

        </p>
        "#);
    }

    #[test]
    fn test_lists_are_unwrapped_containers() {
        let (node, _) = render(BlockKind::BullList {
            content: vec![RichTextRun::plain("item")],
        });
        assert_eq!(node, BlockContent::container(["- item"]));

        let (node, _) = render(BlockKind::EnumList {
            content: vec![RichTextRun::plain("first")],
        });
        assert_eq!(node, BlockContent::container(["1. first"]));

        let (done, _) = render(BlockKind::TodoList {
            content: vec![RichTextRun::plain("ship")],
            checked: true,
        });
        let (open, _) = render(BlockKind::TodoList {
            content: vec![RichTextRun::plain("ship")],
            checked: false,
        });
        assert_eq!(done.lines(), ["- [x] ship"]);
        assert_eq!(open.lines(), ["- [ ] ship"]);
    }

    #[test]
    fn test_image_registers_placeholder() {
        let (node, ctx) = render(BlockKind::Image {
            media: MediaRef::Internal {
                download_url: "https://cdn.wolai.com/a.png".into(),
            },
            dimensions: Some(Dimensions {
                width: 640.0,
                height: 480.5,
            }),
        });
        assert_eq!(
            node.lines()[2],
            "<img src=\"[image0]\" width=\"640\" height=\"480.5\">"
        );
        assert_eq!(ctx.images()[0].source_url, "https://cdn.wolai.com/a.png");
    }

    #[test]
    fn test_image_without_dimensions() {
        let (node, _) = render(BlockKind::Image {
            media: MediaRef::External {
                url: "https://a.com/x.gif".into(),
            },
            dimensions: None,
        });
        assert_eq!(node.lines()[2], "<img src=\"[image0]\">");
    }

    #[test]
    fn test_callout_equation_embed_divider() {
        let (callout, _) = render(BlockKind::Callout {
            icon: Some("💡".into()),
            content: vec![RichTextRun::plain("note")],
        });
        assert_eq!(callout.lines(), anchored(&["::: tip 💡", "note", ":::"]));

        let (eq, _) = render(BlockKind::BlockEquation {
            source: "a^2".into(),
        });
        assert_eq!(eq.lines(), anchored(&["$$a^2$$"]));

        let (embed, _) = render(BlockKind::Embed {
            link: "https://v.com/1".into(),
        });
        assert_eq!(
            embed.lines(),
            anchored(&["<iframe src=\"https://v.com/1\" width=\"100%\" style=\"border:none;\"></iframe>"])
        );

        let (divider, _) = render(BlockKind::Divider);
        assert_eq!(divider.lines(), anchored(&["---"]));
    }

    #[test]
    fn test_page_link_registers_child() {
        let (node, ctx) = render(BlockKind::Page {
            content: vec![RichTextRun::plain("Reading Notes")],
        });
        assert_eq!(node.lines()[2], "[Reading Notes](./Reading%20Notes/index.md)");

        let child = &ctx.child_pages()[&BlockId::from_api("blockAAAA1")];
        assert_eq!(child.title, "Reading Notes");
        assert_eq!(child.dir_name, "Reading Notes");
    }

    #[test]
    fn test_untitled_page_fallback() {
        let (node, ctx) = render(BlockKind::Page {
            content: vec![RichTextRun::plain("   ")],
        });
        assert_eq!(
            node.lines()[2],
            "[untitled-page-blockAAAA1](./untitled-page-blockAAAA1/index.md)"
        );
        assert_eq!(ctx.child_pages().len(), 1);
        let child = &ctx.child_pages()[&BlockId::from_api("blockAAAA1")];
        assert_eq!(child.title, "untitled-page-blockAAAA1");
        assert_eq!(child.dir_name, "untitled-page-blockAAAA1");
    }

    #[test]
    fn test_unsupported_and_malformed() {
        let (node, _) = render(BlockKind::Unsupported {
            block_type: "table".into(),
        });
        assert_eq!(node.lines(), anchored(&[]));

        let (node, _) = render(BlockKind::Malformed {
            block_type: "embed".into(),
            missing: "embed_link",
        });
        assert_eq!(
            node.lines(),
            anchored(&["<!-- skipped embed block blockAAAA1: missing embed_link -->"])
        );
    }
}
