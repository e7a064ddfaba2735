// src/formatting/rich_text/annotations.rs
//! Style wrappers for text runs.
//!
//! Wrappers are applied innermost first in a fixed order, so a run that is
//! both bold and colored always renders as `<span ...>**x**</span>`.

use crate::model::StyledText;
use crate::types::ColorLayer;

/// Applies the run's styles (not its link) to already-trimmed text.
pub fn apply_styles(content: &str, style: &StyledText) -> String {
    let mut result = content.to_string();

    if style.bold {
        result = format!("**{}**", result);
    }
    if style.italic {
        result = format!("*{}*", result);
    }
    if style.underline {
        result = format!(
            "<span style=\"text-decoration:underline;\">{}</span>",
            result
        );
    }
    if style.strikethrough {
        result = format!("~~{}~~", result);
    }
    if style.inline_code {
        result = format!("`{}`", result);
    }

    if let Some(name) = &style.front_color {
        result = apply_color(result, ColorLayer::Foreground, name);
    }
    if let Some(name) = &style.back_color {
        result = apply_color(result, ColorLayer::Background, name);
    }

    result
}

/// Wraps text in a link whose target may contain spaces or parentheses.
pub fn apply_link(content: &str, url: &str) -> String {
    format!("[{}](<{}>)", content, url)
}

fn apply_color(content: String, layer: ColorLayer, name: &str) -> String {
    match layer.hex(name) {
        Some(hex) => format!(
            "<span style=\"{}:{};\">{}</span>",
            layer.css_property(),
            hex,
            content
        ),
        None => {
            log::debug!("Unknown {:?} color '{}', leaving text uncolored", layer, name);
            content
        }
    }
}
