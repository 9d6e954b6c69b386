//! Inline hashtag extraction from note content.
//!
//! Strips Markdown constructs that commonly contain `#` without meaning a
//! tag before matching.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use notable_core::split_lines;

static HASHTAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^a-zA-Z0-9_-])#([a-zA-Z][a-zA-Z0-9_-]*)").expect("valid hashtag regex")
});

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z0-9_-]*\n.*?```").expect("valid code block regex"));

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]+`").expect("valid inline code regex"));

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^\s<>\[\]()]+|www\.[^\s<>\[\]()]+").expect("valid url regex")
});

/// Extract hashtags from note text.
///
/// Returns lowercase tag names in first-seen order without duplicates.
///
/// # Rules
///
/// 1. Hashtags start with `#` followed by a letter
/// 2. Then letters, digits, hyphens, and underscores
/// 3. Markdown headings (`# Heading`) are not tags
/// 4. Code blocks, inline code, link targets and URLs are ignored
///
/// # Examples
///
/// ```
/// use notable_extract::extract_hashtags;
///
/// let tags = extract_hashtags("#tag, #Tag! and also #second_tag.");
/// assert_eq!(tags, vec!["tag", "second_tag"]);
/// ```
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let cleaned = CODE_BLOCK.replace_all(content, "");
    let cleaned = INLINE_CODE.replace_all(&cleaned, "");
    let cleaned = remove_headings(&cleaned);
    let cleaned = MARKDOWN_LINK.replace_all(&cleaned, "$1");
    let cleaned = URL.replace_all(&cleaned, "");

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for cap in HASHTAG.captures_iter(&cleaned) {
        if let Some(tag) = cap.get(1) {
            let name = tag.as_str().to_lowercase();
            if seen.insert(name.clone()) {
                tags.push(name);
            }
        }
    }
    tags
}

/// Remove Markdown headings (`#` runs followed by a space or end of line).
fn remove_headings(content: &str) -> String {
    split_lines(content)
        .filter(|line| {
            let trimmed = line.trim_start();
            if !trimmed.starts_with('#') {
                return true;
            }
            let after = trimmed.trim_start_matches('#');
            !(after.is_empty() || after.starts_with(' '))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
