//! Mock completion backend for deterministic testing.
//!
//! Serves canned responses, optional simulated latency and failures, and
//! records every request so tests can assert on prompts and parameters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notable_inference::mock::MockCompletionBackend;
//!
//! let backend = MockCompletionBackend::new().with_fixed_response("- review PR");
//! let text = backend.complete(&request).await?;
//! assert_eq!(backend.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notable_core::{CompletionBackend, CompletionRequest, Error, Result};

/// Mock completion backend for testing.
#[derive(Clone)]
pub struct MockCompletionBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    /// (prompt substring, response) pairs checked in insertion order.
    mapped_responses: Vec<(String, String)>,
    default_response: String,
    latency: Duration,
    failure: Option<String>,
    healthy: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            mapped_responses: Vec::new(),
            default_response: "NONE".to_string(),
            latency: Duration::ZERO,
            failure: None,
            healthy: true,
        }
    }
}

impl MockCompletionBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned when no mapping matches.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `output` for prompts containing `needle`.
    pub fn with_response_mapping(
        mut self,
        needle: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .push((needle.into(), output.into()));
        self
    }

    /// Delay every completion by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        Arc::make_mut(&mut self.config).latency = latency;
        self
    }

    /// Fail every completion with an `ExtractionBackend` error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Set the result reported by `health_check`.
    pub fn with_health(mut self, healthy: bool) -> Self {
        Arc::make_mut(&mut self.config).healthy = healthy;
        self
    }

    /// Get all logged requests for assertion.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn response_for(&self, prompt: &str) -> String {
        self.config
            .mapped_responses
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| self.config.default_response.clone())
    }
}

impl Default for MockCompletionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.call_log.lock().unwrap().push(request.clone());

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if let Some(message) = &self.config.failure {
            return Err(Error::ExtractionBackend(message.clone()));
        }

        Ok(self.response_for(&request.prompt))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.healthy)
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
