//! Completion configuration.
//!
//! Read once at process start and passed into extractors explicitly.
//! Environment variables:
//! - `LLM_MODEL` - generation model (default `llama3.1:8b`)
//! - `LLM_TEMPERATURE` - sampling temperature, clamped to `0.0..=2.0`
//! - `LLM_TIMEOUT_SECS` - per-request timeout in seconds

use std::time::Duration;
use tracing::{debug, warn};

use notable_core::defaults;
use notable_core::{CompletionRequest, Error, Result};

/// Model name, temperature and timeout for completion calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: defaults::GEN_MODEL.to_string(),
            temperature: defaults::GEN_TEMPERATURE,
            timeout: Duration::from_secs(defaults::GEN_TIMEOUT_SECS),
        }
    }
}

impl CompletionConfig {
    /// Create a configuration, validating the model name and clamping temperature.
    pub fn new(model: impl Into<String>, temperature: f32, timeout: Duration) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(Error::Config("model name must not be empty".to_string()));
        }
        if timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(Self {
            model,
            temperature: clamp_temperature(temperature),
            timeout,
        })
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (environment, `.env` map, test fixture).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let model = lookup("LLM_MODEL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(base.model);

        let temperature = match lookup("LLM_TEMPERATURE") {
            Some(raw) => match raw.trim().parse::<f32>() {
                Ok(t) if t.is_finite() => clamp_temperature(t),
                _ => {
                    warn!(value = %raw, "Invalid LLM_TEMPERATURE, using default");
                    base.temperature
                }
            },
            None => base.temperature,
        };

        let timeout = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Invalid LLM_TIMEOUT_SECS, using default");
                    base.timeout
                }
            },
            None => base.timeout,
        };

        debug!(
            model = %model,
            temperature,
            timeout_secs = timeout.as_secs(),
            "Loaded completion config"
        );

        Self {
            model,
            temperature,
            timeout,
        }
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a request carrying this configuration.
    pub fn request(&self, system: impl Into<String>, prompt: impl Into<String>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            system: system.into(),
            prompt: prompt.into(),
            temperature: self.temperature,
            timeout: self.timeout,
        }
    }
}

fn clamp_temperature(t: f32) -> f32 {
    t.clamp(0.0, defaults::GEN_TEMPERATURE_MAX)
}
