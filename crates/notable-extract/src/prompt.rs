//! Prompt construction for model-backed extraction.
//!
//! The output contract requested from the model is line oriented: one item
//! per line prefixed with `- `, or the single word `NONE`. The parser in
//! [`crate::response`] relies on the same contract.

/// Marker the model is told to emit when nothing is actionable.
pub const NONE_MARKER: &str = "NONE";

const NOTE_BEGIN: &str = "<<<NOTE";
const NOTE_END: &str = "NOTE>>>";

/// System instruction sent with every extraction request.
pub const SYSTEM_PROMPT: &str = r#"You extract action items from notes.
An action item is a short, concrete task someone has to do.

Output rules:
- Write one action item per line.
- Start every line with "- " followed by the task as a short imperative phrase.
- Keep the wording of the note where possible; do not invent tasks.
- If the note contains no action items, reply with exactly: NONE
- Do not add a title, preamble, numbering, explanations, or closing remarks."#;

/// Build the user prompt embedding `text` verbatim between delimiters.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Extract the action items from the note between {begin} and {end}.\n\n{begin}\n{text}\n{end}\n\nReply with \"- \" lines only, or {none}.",
        begin = NOTE_BEGIN,
        end = NOTE_END,
        text = text,
        none = NONE_MARKER,
    )
}
