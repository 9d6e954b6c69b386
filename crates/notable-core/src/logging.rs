//! Structured logging schema and field name constants for notable.
//!
//! Event macros reference these constants as `{ NAME } = value`.
//! `#[instrument]` field lists take identifiers only and spell the same
//! names out.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, malformed model output, slow backend |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-line classification decisions |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "inference", "extract"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "ollama", "heuristic", "model_extractor"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "complete", "extract", "parse_response"
pub const OPERATION: &str = "op";

/// Extraction mode requested by the caller ("heuristic", "llm").
pub const MODE: &str = "mode";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of items produced by an extraction.
pub const RESULT_COUNT: &str = "result_count";

/// Number of input lines inspected.
pub const LINE_COUNT: &str = "line_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

/// Sampling temperature sent to the backend.
pub const TEMPERATURE: &str = "temperature";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_FIELDS: &[&str] = &[
        SUBSYSTEM,
        COMPONENT,
        OPERATION,
        MODE,
        DURATION_MS,
        RESULT_COUNT,
        LINE_COUNT,
        PROMPT_LEN,
        RESPONSE_LEN,
        MODEL,
        TEMPERATURE,
        ERROR_MSG,
        SLOW,
    ];

    #[test]
    fn test_field_names_are_unique() {
        let unique: HashSet<_> = ALL_FIELDS.iter().collect();
        assert_eq!(unique.len(), ALL_FIELDS.len());
    }

    #[test]
    fn test_field_names_are_snake_case() {
        for field in ALL_FIELDS {
            assert!(
                field
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "field {} is not snake_case",
                field
            );
        }
    }
}
