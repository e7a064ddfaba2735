//! Inline content of a block: styled text runs and special inline elements.

use serde::{Deserialize, Deserializer, Serialize};

/// One styled span or special inline element within a block's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextRun {
    /// Plain or styled text, optionally linked.
    Text(StyledText),
    /// Inline math; `title` holds the source.
    Equation {
        #[serde(default)]
        title: String,
    },
    /// Footnote reference carrying its own body.
    Footnote {
        #[serde(default)]
        title: String,
        #[serde(default, deserialize_with = "deserialize_runs")]
        content: Vec<RichTextRun>,
    },
    /// Cross-reference to another block on the page.
    BiLink {
        #[serde(default)]
        title: String,
        #[serde(rename = "block_id", default)]
        target_block_id: String,
    },
    /// Member mentions and anything else not rendered.
    #[serde(other)]
    Unsupported,
}

/// Text and its annotations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyledText {
    pub title: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub inline_code: bool,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub front_color: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub back_color: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub link: Option<String>,
}

impl RichTextRun {
    /// An unstyled text run.
    pub fn plain(title: impl Into<String>) -> Self {
        RichTextRun::Text(StyledText::new(title))
    }

    /// The run's raw title, whatever its variant.
    pub fn title(&self) -> &str {
        match self {
            RichTextRun::Text(text) => &text.title,
            RichTextRun::Equation { title }
            | RichTextRun::Footnote { title, .. }
            | RichTextRun::BiLink { title, .. } => title,
            RichTextRun::Unsupported => "",
        }
    }
}

impl StyledText {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn inline_code(mut self) -> Self {
        self.inline_code = true;
        self
    }

    pub fn front_color(mut self, color: impl Into<String>) -> Self {
        self.front_color = Some(color.into());
        self
    }

    pub fn back_color(mut self, color: impl Into<String>) -> Self {
        self.back_color = Some(color.into());
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

impl From<StyledText> for RichTextRun {
    fn from(text: StyledText) -> Self {
        RichTextRun::Text(text)
    }
}

/// Concatenates the raw titles of a run sequence, without any markup.
pub fn plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(RichTextRun::title).collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// wolai returns block content either as an array of runs or, for blocks
/// created with a bare string, as that string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentRepr {
    Runs(Vec<RichTextRun>),
    Plain(String),
}

pub(crate) fn deserialize_runs<'de, D>(deserializer: D) -> Result<Vec<RichTextRun>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ContentRepr>::deserialize(deserializer)? {
        Some(ContentRepr::Runs(runs)) => runs,
        Some(ContentRepr::Plain(text)) if !text.is_empty() => vec![RichTextRun::plain(text)],
        Some(ContentRepr::Plain(_)) | None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_run_parsing() {
        let json = r#"{
            "type": "text",
            "title": "hello",
            "bold": true,
            "front_color": "red",
            "back_color": "",
            "link": "https://www.wolai.com"
        }"#;
        let run: RichTextRun = serde_json::from_str(json).unwrap();
        assert_eq!(
            run,
            RichTextRun::from(
                StyledText::new("hello")
                    .bold()
                    .front_color("red")
                    .link("https://www.wolai.com")
            )
        );
    }

    #[test]
    fn test_special_runs_parsing() {
        let json = r#"[
            {"type": "equation", "title": "E=mc^2"},
            {"type": "bi_link", "title": "see", "block_id": "abcdefgh12"},
            {"type": "footnote", "title": "1", "content": [{"type": "text", "title": "note"}]},
            {"type": "mention_member", "title": "@someone"}
        ]"#;
        let runs: Vec<RichTextRun> = serde_json::from_str(json).unwrap();
        assert_eq!(
            runs,
            vec![
                RichTextRun::Equation {
                    title: "E=mc^2".into()
                },
                RichTextRun::BiLink {
                    title: "see".into(),
                    target_block_id: "abcdefgh12".into()
                },
                RichTextRun::Footnote {
                    title: "1".into(),
                    content: vec![RichTextRun::plain("note")]
                },
                RichTextRun::Unsupported,
            ]
        );
    }

    #[test]
    fn test_plain_text() {
        let runs = vec![
            RichTextRun::plain("a "),
            RichTextRun::Equation { title: "x".into() },
            RichTextRun::Unsupported,
        ];
        assert_eq!(plain_text(&runs), "a x");
    }
}
