//! Centralized default constants for notable.
//!
//! All crates and the API server reference these constants instead of
//! defining their own magic numbers.

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model used for action-item extraction.
pub const GEN_MODEL: &str = "llama3.1:8b";

/// Default sampling temperature. Zero keeps extraction deterministic.
pub const GEN_TEMPERATURE: f32 = 0.0;

/// Upper bound accepted for the sampling temperature.
pub const GEN_TEMPERATURE_MAX: f32 = 2.0;

/// Timeout for a single completion request (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Timeout for backend health checks (seconds).
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Generation slower than this is logged at WARN with `slow = true`.
pub const SLOW_GENERATION_MS: u64 = 30_000;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body (bytes). Notes are plain text.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
