//! Parsing of model replies into action items.
//!
//! Lenient about formatting noise (bullet style, numbering, code fences,
//! JSON instead of lines, preambles) but strict about structure: prose with
//! no list at all is an [`Error::ExtractionParse`], never an empty result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use notable_core::{split_lines, ActionItemText, Error, ExtractionResult, Result};

use crate::markers::{has_content, strip_markers};

/// Residue lines the model adds despite instructions. Only checked
/// against lines without a list marker.
const DEFAULT_RESIDUE_PATTERNS: &[&str] = &[
    // Preambles: "Here are the action items:", "Sure!", "Certainly, ..."
    r"(?i)^(?:here (?:are|is)|below (?:are|is)|sure\b|okay\b|ok\b|certainly\b|of course\b|absolutely\b)",
    // Headings such as "Action items:" or "**Tasks:**"
    r":\**\s*$",
    // Trailing commentary
    r"(?i)^(?:note|disclaimer)\s*:",
    r"(?i)^(?:let me know|i hope|hope this|feel free)\b",
    r"(?i)^(?:i (?:found|extracted|identified|have extracted))\b",
];

/// Explicit "nothing found" answers, checked against unmarked lines and
/// against marked item text alike (`- NONE`).
const NONE_ANSWER_PATTERN: &str =
    r"(?i)^(?:none|n/?a|nothing|no (?:action items?|tasks?)(?: (?:found|identified))?)[.!]?$";

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_-]*\s*$").expect("valid fence regex"));

/// Keys accepted for item objects in JSON replies.
const ITEM_KEYS: &[&str] = &["action", "text", "task", "item", "title"];

/// Keys accepted for the item array in JSON replies.
const LIST_KEYS: &[&str] = &["items", "action_items", "actions", "tasks"];

/// Patterns for model residue rather than action items.
///
/// Unmarked lines are checked against every pattern. Marked list items are
/// only checked against the "nothing found" answer and caller-added
/// patterns, so a real item such as `- Note: renew passport` survives.
/// The default set is not exhaustive; callers may extend it.
#[derive(Debug, Clone)]
pub struct RejectPatterns {
    lines: Vec<Regex>,
    items: Vec<Regex>,
}

impl Default for RejectPatterns {
    fn default() -> Self {
        let none_answer = Regex::new(NONE_ANSWER_PATTERN).expect("valid none-answer pattern");
        let mut lines: Vec<Regex> = DEFAULT_RESIDUE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid default reject pattern"))
            .collect();
        lines.push(none_answer.clone());
        Self {
            lines,
            items: vec![none_answer],
        }
    }
}

impl RejectPatterns {
    /// A set with no patterns at all.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Add a pattern checked against both unmarked lines and list items;
    /// fails with `Error::Config` on invalid regex syntax.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("Invalid reject pattern {:?}: {}", pattern, e)))?;
        self.lines.push(re.clone());
        self.items.push(re);
        Ok(self)
    }

    /// Add several patterns.
    pub fn extend<'a, I>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for pattern in patterns {
            self = self.with_pattern(pattern)?;
        }
        Ok(self)
    }

    /// Whether an unmarked line is residue.
    pub fn is_rejected(&self, line: &str) -> bool {
        self.lines.iter().any(|re| re.is_match(line))
    }

    /// Whether the text of a marked list item is residue.
    pub fn is_rejected_item(&self, text: &str) -> bool {
        self.items.iter().any(|re| re.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse a model reply into action items.
///
/// - empty reply or `NONE` → empty result
/// - JSON array / `{"items": [...]}` → items from strings or item objects
/// - otherwise one item per marked line; unmarked lines are commentary
///
/// Fails with `Error::ExtractionParse` when the reply has content but no
/// list structure, or is JSON of an unrecognized shape.
pub fn parse_response(raw: &str, reject: &RejectPatterns) -> Result<ExtractionResult> {
    let body = strip_code_fences(raw);
    let body = body.trim();

    if body.is_empty() || is_none_answer(body) {
        return Ok(ExtractionResult::new());
    }

    if body.starts_with('{') || body.starts_with('[') {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => return parse_json(&value, reject),
            // "[ ] task" lines start with '[' too; only objects must be JSON.
            Err(e) if body.starts_with('{') => {
                return Err(Error::ExtractionParse(format!(
                    "Reply looks like JSON but is invalid: {}",
                    e
                )))
            }
            Err(_) => {}
        }
    }

    parse_lines(body, reject)
}

fn parse_lines(body: &str, reject: &RejectPatterns) -> Result<ExtractionResult> {
    let mut items = ExtractionResult::new();
    let mut saw_list = false;
    let mut commentary: Vec<&str> = Vec::new();

    for line in split_lines(body).map(str::trim).filter(|l| !l.is_empty()) {
        let stripped = strip_markers(line);
        if !stripped.marked {
            if reject.is_rejected(line) {
                trace!(line, "Rejected residue line");
            } else {
                commentary.push(line);
            }
            continue;
        }

        saw_list = true;
        if !has_content(stripped.text) || reject.is_rejected_item(stripped.text) {
            trace!(line, "Rejected marked line");
            continue;
        }
        items.push(to_item(stripped.text)?);
    }

    if !saw_list && !commentary.is_empty() {
        return Err(Error::ExtractionParse(format!(
            "Reply has no list structure: {:?}",
            preview(commentary[0])
        )));
    }

    if !commentary.is_empty() {
        debug!(
            dropped = commentary.len(),
            "Dropped unmarked commentary lines"
        );
    }
    Ok(items)
}

/// A candidate with content must become an item; dropping it would turn a
/// list into "nothing actionable".
fn to_item(text: &str) -> Result<ActionItemText> {
    ActionItemText::new(text).ok_or_else(|| {
        Error::ExtractionParse(format!(
            "List item is not single-line text: {:?}",
            preview(text)
        ))
    })
}

fn parse_json(value: &Value, reject: &RejectPatterns) -> Result<ExtractionResult> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                Error::ExtractionParse(format!(
                    "JSON reply has no item list (expected one of {:?})",
                    LIST_KEYS
                ))
            })?,
        _ => {
            return Err(Error::ExtractionParse(
                "JSON reply is neither an array nor an object".to_string(),
            ))
        }
    };

    let mut items = ExtractionResult::new();
    for entry in list {
        let text = match entry {
            Value::String(s) => s.as_str(),
            Value::Object(map) => ITEM_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .ok_or_else(|| {
                    Error::ExtractionParse(format!("JSON item has no text field: {}", entry))
                })?,
            other => {
                return Err(Error::ExtractionParse(format!(
                    "JSON item is not a string: {}",
                    other
                )))
            }
        };

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let stripped = strip_markers(&collapsed);
        if !has_content(stripped.text) || reject.is_rejected_item(stripped.text) {
            continue;
        }
        items.push(to_item(stripped.text)?);
    }
    Ok(items)
}

/// Drop a surrounding Markdown code fence if the model wrapped its reply.
fn strip_code_fences(raw: &str) -> String {
    split_lines(raw)
        .filter(|line| !CODE_FENCE.is_match(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_none_answer(body: &str) -> bool {
    let word = body.trim_end_matches(&['.', '!'][..]).trim();
    word.eq_ignore_ascii_case(crate::prompt::NONE_MARKER)
}

fn preview(line: &str) -> String {
    const MAX: usize = 80;
    if line.chars().count() <= MAX {
        line.to_string()
    } else {
        let cut: String = line.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}
