// src/formatting/rich_text/mod.rs
//! Renders a block's rich text runs into one inline Markdown/HTML string.

mod annotations;

use super::context::ConversionContext;
use crate::model::{RichTextRun, StyledText};
use annotations::{apply_link, apply_styles};

/// Renders runs left to right into a single string.
///
/// Footnote bodies are rendered recursively and stored in `ctx`; everything
/// else only produces inline text.
pub fn render_rich_text(runs: &[RichTextRun], ctx: &mut ConversionContext) -> String {
    let mut output = String::new();
    for run in runs {
        match run {
            RichTextRun::Text(text) => output.push_str(&render_text(text)),
            RichTextRun::Equation { title } => {
                output.push('$');
                output.push_str(title);
                output.push('$');
            }
            RichTextRun::Footnote { content, .. } => {
                let number = ctx.reserve_footnote();
                output.push_str(&format!("[^{}]", number));
                let body = render_rich_text(content, ctx);
                ctx.fill_footnote(number, body);
            }
            RichTextRun::BiLink {
                title,
                target_block_id,
            } => output.push_str(&format!(
                "<a href=\"#{}\" style=\"color:inherit;text-decoration:underline dashed;\">{}</a>",
                target_block_id, title
            )),
            RichTextRun::Unsupported => {
                log::trace!("Skipping unsupported rich text run");
            }
        }
    }
    output
}

fn render_text(text: &StyledText) -> String {
    let trimmed = text.title.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut rendered = apply_styles(trimmed, text);
    if let Some(url) = &text.link {
        rendered = apply_link(&rendered, url);
    }
    rendered.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(runs: &[RichTextRun]) -> (String, ConversionContext) {
        let mut ctx = ConversionContext::new();
        let text = render_rich_text(runs, &mut ctx);
        (text, ctx)
    }

    #[test]
    fn test_bold_red_text() {
        let (text, _) = render(&[StyledText::new("hi").bold().front_color("red").into()]);
        let red = crate::types::ColorLayer::Foreground.hex("red").unwrap();
        assert_eq!(text, format!("<span style=\"color:{};\">**hi**</span>", red));
    }

    #[test]
    fn test_linked_text_with_line_break() {
        let (text, _) = render(&[StyledText::new("a\nb").link("https://x.com").into()]);
        assert_eq!(text, "[a<br>b](<https://x.com>)");
    }

    #[test]
    fn test_styles_nest_inside_the_link() {
        let (text, _) = render(&[StyledText::new("x")
            .bold()
            .italic()
            .underline()
            .link("https://x.com")
            .into()]);
        assert_eq!(
            text,
            "[<span style=\"text-decoration:underline;\">***x***</span>](<https://x.com>)"
        );
    }

    #[test]
    fn test_blank_text_run_renders_nothing() {
        let (text, _) = render(&[
            StyledText::new("   ").bold().into(),
            RichTextRun::plain(" kept "),
        ]);
        assert_eq!(text, "kept");
    }

    #[test]
    fn test_equation_bilink_and_unsupported() {
        let (text, _) = render(&[
            RichTextRun::plain("see"),
            RichTextRun::Equation {
                title: "E=mc^2".into(),
            },
            RichTextRun::BiLink {
                title: "Intro".into(),
                target_block_id: "blkAAAA01".into(),
            },
            RichTextRun::Unsupported,
        ]);
        insta::assert_snapshot!(text, @r##"see$E=mc^2$<a href="#blkAAAA01" style="color:inherit;text-decoration:underline dashed;">Intro</a>"##);
    }

    #[test]
    fn test_footnote_markers_match_definitions() {
        let (text, ctx) = render(&[
            RichTextRun::plain("first"),
            RichTextRun::Footnote {
                title: String::new(),
                content: vec![RichTextRun::plain("one")],
            },
            RichTextRun::Footnote {
                title: String::new(),
                content: vec![RichTextRun::plain("two")],
            },
        ]);
        assert_eq!(text, "first[^1][^2]");
        assert_eq!(ctx.footnotes(), ["one", "two"]);
    }

    #[test]
    fn test_nested_footnote_numbers_after_parent() {
        let (text, ctx) = render(&[RichTextRun::Footnote {
            title: String::new(),
            content: vec![
                RichTextRun::plain("outer"),
                RichTextRun::Footnote {
                    title: String::new(),
                    content: vec![RichTextRun::plain("inner")],
                },
            ],
        }]);
        assert_eq!(text, "[^1]");
        assert_eq!(ctx.footnotes(), ["outer[^2]", "inner"]);
    }
}
