//! Model-backed action-item extraction.
//!
//! One completion call per extraction, no retry and no fallback to the
//! heuristic path. Backend failures and timeouts surface as
//! `Error::ExtractionBackend`; unreadable replies as `Error::ExtractionParse`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, field, info, instrument, warn};

use notable_core::logging::{DURATION_MS, ERROR_MSG, PROMPT_LEN, RESPONSE_LEN, RESULT_COUNT, TEMPERATURE};
use notable_core::{ActionItemExtractor, CompletionBackend, Error, ExtractionResult, Result};
use notable_inference::CompletionConfig;

use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::response::{parse_response, RejectPatterns};

/// Extractor that delegates to a [`CompletionBackend`].
pub struct ModelExtractor {
    backend: Arc<dyn CompletionBackend>,
    config: CompletionConfig,
    reject: RejectPatterns,
}

impl ModelExtractor {
    /// Create an extractor with the default reject patterns.
    pub fn new(backend: Arc<dyn CompletionBackend>, config: CompletionConfig) -> Self {
        Self {
            backend,
            config,
            reject: RejectPatterns::default(),
        }
    }

    /// Replace the reject patterns used to filter model residue.
    pub fn with_reject_patterns(mut self, reject: RejectPatterns) -> Self {
        self.reject = reject;
        self
    }

    async fn complete_bounded(&self, prompt: String) -> Result<String> {
        let request = self.config.request(SYSTEM_PROMPT, prompt);
        match tokio::time::timeout(self.config.timeout, self.backend.complete(&request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::ExtractionBackend(format!(
                "Completion timed out after {}s",
                self.config.timeout.as_secs_f32()
            ))),
        }
    }
}

#[async_trait]
impl ActionItemExtractor for ModelExtractor {
    #[instrument(skip(self, text), fields(subsystem = "extract", component = "model_extractor", op = "extract", model = %self.config.model, backend = %self.backend.backend_name()))]
    async fn extract(&self, text: &str) -> Result<ExtractionResult> {
        if text.trim().is_empty() {
            debug!("Blank input, skipping completion call");
            return Ok(ExtractionResult::new());
        }

        let start = Instant::now();
        let prompt = build_prompt(text);
        debug!(
            { PROMPT_LEN } = prompt.len(),
            { TEMPERATURE } = self.config.temperature,
            "Requesting completion"
        );

        let raw = self.complete_bounded(prompt).await.map_err(|e| {
            warn!({ ERROR_MSG } = field::display(&e), "Completion failed");
            e
        })?;

        let items = parse_response(&raw, &self.reject).map_err(|e| {
            warn!(
                { ERROR_MSG } = field::display(&e),
                { RESPONSE_LEN } = raw.len(),
                "Could not parse model reply"
            );
            e
        })?;

        info!(
            { RESULT_COUNT } = items.len(),
            { RESPONSE_LEN } = raw.len(),
            { DURATION_MS } = start.elapsed().as_millis() as u64,
            "Model extraction complete"
        );
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
