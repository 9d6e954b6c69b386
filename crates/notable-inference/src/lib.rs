//! # notable-inference
//!
//! Completion backend abstraction for notable.
//!
//! This crate provides:
//! - Completion configuration (model, temperature, timeout)
//! - Ollama implementation of [`CompletionBackend`] (default)
//! - Mock backend with canned responses (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use notable_inference::{CompletionConfig, OllamaBackend};
//! use notable_core::CompletionBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CompletionConfig::from_env();
//!     let backend = OllamaBackend::from_env().unwrap();
//!     let request = config.request("Be terse.", "Say hello.");
//!     let text = backend.complete(&request).await.unwrap();
//!     println!("{}", text);
//! }
//! ```

pub mod config;

#[cfg(feature = "ollama")]
pub mod ollama;

// Mock completion backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use notable_core::*;

pub use config::CompletionConfig;

#[cfg(feature = "ollama")]
pub use ollama::OllamaBackend;
