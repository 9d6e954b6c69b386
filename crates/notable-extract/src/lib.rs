//! # notable-extract
//!
//! Turns free-form note text into action items.
//!
//! Two interchangeable implementations of [`ActionItemExtractor`]:
//! - [`HeuristicExtractor`]: line-level lexical cues, no I/O, never fails
//! - [`ModelExtractor`]: one completion call with a constrained output
//!   contract, defensive parsing of the reply
//!
//! Also provides inline hashtag extraction for note bodies.
//!
//! # Example
//!
//! ```rust
//! use notable_extract::extract_action_items;
//!
//! let items = extract_action_items("TODO: buy milk\nJust a note.\nAction: call Bob");
//! assert_eq!(items, vec!["buy milk", "call Bob"]);
//! ```

pub mod hashtags;
pub mod heuristic;
pub mod markers;
pub mod model;
pub mod prompt;
pub mod response;

pub use notable_core::{ActionItemExtractor, ActionItemText, Error, ExtractionResult, Result};

pub use hashtags::extract_hashtags;
pub use heuristic::{extract_action_items, HeuristicExtractor};
pub use model::ModelExtractor;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use response::{parse_response, RejectPatterns};
