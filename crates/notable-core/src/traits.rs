//! Core traits for notable abstractions.
//!
//! These traits define the seams between extraction logic and the outside
//! world so that concrete backends can be swapped for test doubles.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::models::ExtractionResult;

// =============================================================================
// EXTRACTION TRAITS
// =============================================================================

/// Turns free-form note text into action items.
///
/// Implementations are stateless across calls and may be shared between
/// concurrent requests.
#[async_trait]
pub trait ActionItemExtractor: Send + Sync {
    /// Extract action items from `text`, preserving order of appearance.
    async fn extract(&self, text: &str) -> Result<ExtractionResult>;

    /// Short identifier used in logs ("heuristic", "llm").
    fn name(&self) -> &'static str;
}

// =============================================================================
// COMPLETION TRAITS
// =============================================================================

/// A single non-streaming completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    /// System instruction; empty means none.
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    /// Upper bound on the whole request/response exchange.
    pub timeout: Duration,
}

/// A text-generation service that accepts a prompt and returns generated text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;

    /// Backend identifier for logs ("ollama", "mock").
    fn backend_name(&self) -> &str;
}
