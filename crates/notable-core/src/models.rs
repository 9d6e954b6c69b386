//! Data models shared by the extraction paths and the API layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// True for every character that ends a line: `\n`, `\r`, vertical tab,
/// form feed, the ASCII separators `\x1c`..`\x1e`, NEL, and the Unicode
/// line and paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` on every line terminator, not only `\n`.
///
/// `\r\n` yields an empty piece between the two characters; callers
/// already skip blank lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
}

/// A single extracted action item.
///
/// Always non-empty, trimmed, and free of embedded newlines. Persistence
/// fields (id, note reference, completion flag) are assigned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionItemText(String);

impl ActionItemText {
    /// Trim `text` and wrap it, or `None` if nothing valid remains.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() || trimmed.contains(is_line_break) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ActionItemText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ActionItemText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for ActionItemText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for ActionItemText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ActionItemText::new(&raw).ok_or_else(|| {
            serde::de::Error::custom("action item must be non-empty single-line text")
        })
    }
}

/// Ordered extraction output. Empty means "nothing actionable found".
pub type ExtractionResult = Vec<ActionItemText>;

/// An action item as returned across the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Sequential id, starting at 1, in extraction order.
    pub id: u64,
    pub text: String,
}

impl ExtractedItem {
    /// Wrap each item with a sequential id in result order.
    pub fn number(items: ExtractionResult) -> Vec<ExtractedItem> {
        items
            .into_iter()
            .zip(1u64..)
            .map(|(text, id)| ExtractedItem {
                id,
                text: text.into_string(),
            })
            .collect()
    }
}

/// Which extraction path a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Rule-based extraction, no external dependency.
    #[default]
    Heuristic,
    /// Delegate to the completion backend.
    Llm,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Heuristic => "heuristic",
            ExtractionMode::Llm => "llm",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "rules" => Ok(ExtractionMode::Heuristic),
            "llm" | "model" => Ok(ExtractionMode::Llm),
            other => Err(format!("Unknown extraction mode: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for ExtractionMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
