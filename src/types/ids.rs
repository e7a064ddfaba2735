use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Identifier of a wolai block. Pages are blocks too, so the same type
/// addresses both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

lazy_static::lazy_static! {
    static ref ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{8,64}$")
        .expect("Failed to compile block ID regex - this is a bug in the code");
}

impl BlockId {
    /// Parse a block ID from user input: a bare ID or a wolai page URL.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();

        if input.starts_with("http://") || input.starts_with("https://") {
            let id = extract_id_from_url(input).ok_or_else(|| {
                ValidationError::InvalidId(format!("Could not extract ID from URL: {}", input))
            })?;
            return Self::parse(&id);
        }

        if input.is_empty() {
            return Err(ValidationError::EmptyField("block id"));
        }

        if !ID_REGEX.is_match(input) {
            return Err(ValidationError::InvalidId(format!(
                "'{}' is not a wolai block ID",
                input
            )));
        }

        Ok(Self(input.to_string()))
    }

    /// Wrap an ID exactly as the API reported it.
    pub fn from_api(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_api(value))
    }
}

/// Pulls the page ID out of a wolai URL.
///
/// Handles `https://www.wolai.com/<id>` and
/// `https://www.wolai.com/<workspace>/<id>`, ignoring query and fragment.
fn extract_id_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
