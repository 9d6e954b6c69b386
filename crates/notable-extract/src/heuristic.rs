//! Rule-based action-item extraction.
//!
//! Works at line granularity. A line becomes an item when it matches one of
//! three cues:
//!
//! 1. a task marker prefix (see [`crate::markers`]), which is stripped;
//! 2. a modal opener at the start of one of its sentences
//!    ("need to", "should", "must", "will", ...), optionally after a
//!    subject pronoun;
//! 3. a trailing `!` on a clause led by an imperative verb.
//!
//! Order of appearance is kept and duplicates are kept. When no line
//! qualifies, the whole input (whitespace collapsed) is tried once as a
//! single candidate so that markers wrapped onto their own line still count.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, trace};

use notable_core::logging::{COMPONENT, LINE_COUNT, RESULT_COUNT, SUBSYSTEM};

use notable_core::{split_lines, ActionItemExtractor, ActionItemText, ExtractionResult, Result};

use crate::markers::{has_content, strip_markers};

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("valid sentence regex"));

static MODAL_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:i|we|you|they|he|she|someone|somebody|everyone)\s+)?(?:need to|needs to|have to|has to|should|must|will|remember to|make sure|don'?t forget to|do not forget to)\b",
    )
    .expect("valid modal regex")
});

static IMPERATIVE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "add", "analyze", "assign", "book", "buy", "call", "check", "clarify", "clean",
        "complete", "confirm", "contact", "create", "debug", "delete", "deploy", "design",
        "document", "email", "ensure", "finish", "fix", "follow", "get", "handle",
        "implement", "improve", "inform", "investigate", "merge", "monitor", "move",
        "notify", "order", "pay", "pick", "plan", "prepare", "prioritize", "publish",
        "refactor", "release", "remove", "resolve", "review", "schedule", "send", "set",
        "ship", "start", "submit", "test", "track", "update", "upload", "validate",
        "verify", "write",
    ]
    .into_iter()
    .collect()
});

/// Which cue qualified a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Marker,
    Modal,
    Emphatic,
}

/// Classify one trimmed, non-empty line and produce its item text.
fn classify(line: &str) -> Option<(Cue, ActionItemText)> {
    let stripped = strip_markers(line);
    if stripped.marked {
        // Marker-only lines ("- [ ]", "TODO:") carry nothing to record.
        if !has_content(stripped.text) {
            return None;
        }
        return ActionItemText::new(stripped.text).map(|item| (Cue::Marker, item));
    }

    if !has_content(line) {
        return None;
    }

    if has_modal_opener(line) {
        return ActionItemText::new(line).map(|item| (Cue::Modal, item));
    }

    if line.ends_with('!') && is_verb_led(line) {
        return ActionItemText::new(line).map(|item| (Cue::Emphatic, item));
    }

    None
}

/// Questions ("Will it rain?") are never openers.
fn has_modal_opener(line: &str) -> bool {
    SENTENCE
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .any(|sentence| !sentence.ends_with('?') && MODAL_OPENER.is_match(sentence))
}

fn is_verb_led(line: &str) -> bool {
    line.split(|c: char| !c.is_alphabetic() && c != '\'')
        .find(|word| !word.is_empty())
        .map(|word| IMPERATIVE_VERBS.contains(word.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Extract action items from `text` using line-level cues.
///
/// Total: every input yields a (possibly empty) result.
pub fn extract_action_items(text: &str) -> ExtractionResult {
    let mut items = ExtractionResult::new();
    let mut line_count = 0usize;

    for line in split_lines(text).map(str::trim).filter(|l| !l.is_empty()) {
        line_count += 1;
        match classify(line) {
            Some((cue, item)) => {
                trace!(?cue, item = %item, "Line accepted");
                items.push(item);
            }
            None => trace!(line, "Line skipped"),
        }
    }

    if items.is_empty() && line_count > 1 {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some((cue, item)) = classify(&collapsed) {
            debug!(?cue, "Whole input matched as a single candidate");
            items.push(item);
        }
    }

    debug!(
        { SUBSYSTEM } = "extract",
        { COMPONENT } = "heuristic",
        { LINE_COUNT } = line_count,
        { RESULT_COUNT } = items.len(),
        "Heuristic extraction complete"
    );
    items
}

/// Rule-based extractor. Stateless; never returns an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionItemExtractor for HeuristicExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractionResult> {
        Ok(extract_action_items(text))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &ExtractionResult) -> Vec<&str> {
        items.iter().map(ActionItemText::as_str).collect()
    }

    #[test]
    fn test_keyword_markers_in_order() {
        let items = extract_action_items("TODO: buy milk\nJust a note.\nAction: call Bob");
        assert_eq!(texts(&items), vec!["buy milk", "call Bob"]);
    }

    #[test]
    fn test_carriage_return_and_unicode_line_breaks() {
        let items = extract_action_items("TODO: buy milk\rAction: call Bob");
        assert_eq!(texts(&items), vec!["buy milk", "call Bob"]);

        let items = extract_action_items("- send invoice\u{2028}Just a note.\u{2029}- book room");
        assert_eq!(texts(&items), vec!["send invoice", "book room"]);

        let items = extract_action_items("TODO: buy milk\r\nAction: call Bob\r\n");
        assert_eq!(texts(&items), vec!["buy milk", "call Bob"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_action_items("").is_empty());
        assert!(extract_action_items("   \n\t\n").is_empty());
    }

    #[test]
    fn test_nothing_actionable() {
        assert!(extract_action_items("Meeting notes only, nothing actionable here.").is_empty());
    }

    #[test]
    fn test_bullets_and_checkboxes() {
        let text = "Notes from meeting:\n- [ ] Set up database\n* implement API extract endpoint\n1. Write tests\nSome narrative sentence.";
        let items = extract_action_items(text);
        assert_eq!(
            texts(&items),
            vec![
                "Set up database",
                "implement API extract endpoint",
                "Write tests"
            ]
        );
    }

    #[test]
    fn test_modal_openers() {
        let text = "We need to renew the domain\nThe weather was nice.\nYou should call the landlord\nWill it rain?";
        let items = extract_action_items(text);
        assert_eq!(
            texts(&items),
            vec!["We need to renew the domain", "You should call the landlord"]
        );
    }

    #[test]
    fn test_modal_opener_in_later_sentence() {
        let items = extract_action_items("Budget is approved. Must file the report by Friday.");
        assert_eq!(
            texts(&items),
            vec!["Budget is approved. Must file the report by Friday."]
        );
    }

    #[test]
    fn test_modal_word_mid_sentence_is_not_an_opener() {
        assert!(extract_action_items("The team said it must have been the cache.").is_empty());
    }

    #[test]
    fn test_emphatic_verb_led() {
        let items = extract_action_items("Ship it!\nWhat a day!\nFix the login bug!");
        assert_eq!(texts(&items), vec!["Ship it!", "Fix the login bug!"]);
    }

    #[test]
    fn test_verb_without_emphasis_is_skipped() {
        assert!(extract_action_items("Review went well overall").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let items = extract_action_items("TODO: water plants\nTODO: water plants");
        assert_eq!(texts(&items), vec!["water plants", "water plants"]);
    }

    #[test]
    fn test_marker_only_lines_dropped() {
        let items = extract_action_items("-\nTODO:\n- [ ]\n* ...\n- real task");
        assert_eq!(texts(&items), vec!["real task"]);
    }

    #[test]
    fn test_stacked_markers_stripped() {
        let items = extract_action_items("- TODO: write tests\n- Ship it!");
        assert_eq!(texts(&items), vec!["write tests", "Ship it!"]);
    }

    #[test]
    fn test_whole_input_fallback() {
        let items = extract_action_items("TODO:\nbuy milk and eggs");
        assert_eq!(texts(&items), vec!["buy milk and eggs"]);
    }

    #[test]
    fn test_whole_input_fallback_requires_cue() {
        assert!(extract_action_items("Lunch was fine.\nNothing else happened.").is_empty());
    }

    #[test]
    fn test_long_line_is_single_candidate() {
        let long = format!("TODO: {}", "word ".repeat(500));
        let items = extract_action_items(&long);
        assert_eq!(items.len(), 1);
        assert!(!items[0].as_str().contains('\n'));
    }

    #[test]
    fn test_items_are_trimmed_and_non_empty() {
        let text = "  -   padded item   \n\t* tabbed\r\nTODO:   spaced   ";
        let items = extract_action_items(text);
        assert_eq!(texts(&items), vec!["padded item", "tabbed", "spaced"]);
        for item in &items {
            assert_eq!(item.as_str(), item.as_str().trim());
            assert!(!item.as_str().is_empty());
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "TODO: a\n- b\nWe should c\nnoise";
        assert_eq!(extract_action_items(text), extract_action_items(text));
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let inputs = [
            "\u{0}",
            "!!!",
            "🙂 - [ ] 🚀",
            "\r\r\r",
            "1.",
            "[todo]",
            "Ünïcödé: müssen wir",
            "- \u{200b}",
        ];
        for input in inputs {
            for item in extract_action_items(input) {
                assert!(!item.as_str().is_empty());
                assert_eq!(item.as_str(), item.as_str().trim());
            }
        }
    }

    #[tokio::test]
    async fn test_trait_impl_matches_function() {
        let extractor = HeuristicExtractor::new();
        let text = "TODO: buy milk\nAction: call Bob";
        let via_trait = extractor.extract(text).await.unwrap();
        assert_eq!(via_trait, extract_action_items(text));
        assert_eq!(extractor.name(), "heuristic");
    }
}
