//! Task-marker recognition shared by the heuristic path and the model
//! response parser.
//!
//! A marker is a list bullet (`-`, `*`, `+`, `•`), a number (`1.`, `2)`),
//! a checkbox (`[ ]`, `[x]`, `[todo]`) or a keyword prefix (`TODO:`,
//! `Action:`, ...). Markers may be stacked, e.g. `- [ ] TODO: ship it`.

use once_cell::sync::Lazy;
use regex::Regex;

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+•]|\d{1,3}[.)])\s+").expect("valid bullet regex"));

static CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[(?: |x|todo)\]\s*").expect("valid checkbox regex"));

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:todo|action items?|action|next steps?|next|fixme|follow[- ]?up|reminder)\s*:\s*",
    )
    .expect("valid keyword regex")
});

/// Result of stripping leading markers from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// Remaining text, trimmed.
    pub text: &'a str,
    /// Whether at least one marker was removed.
    pub marked: bool,
}

/// Remove every leading marker from `line`.
pub fn strip_markers(line: &str) -> Stripped<'_> {
    let mut rest = line.trim();
    let mut marked = false;

    loop {
        let matched = [&*BULLET, &*CHECKBOX, &*KEYWORD]
            .iter()
            .find_map(|re| re.find(rest));
        match matched {
            Some(m) if m.end() > 0 => {
                rest = rest[m.end()..].trim_start();
                marked = true;
            }
            _ => break,
        }
    }

    Stripped {
        text: rest.trim_end(),
        marked,
    }
}

/// True if `text` carries any letter or digit.
pub fn has_content(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}
