//! Ollama completion backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use notable_core::defaults;
use notable_core::logging::{DURATION_MS, PROMPT_LEN, RESPONSE_LEN, SLOW};
use notable_core::{CompletionBackend, CompletionRequest, Error, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = defaults::OLLAMA_URL;

/// Ollama completion backend using the `/api/chat` endpoint.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    /// Create a backend pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("Ollama base URL must not be empty".to_string()));
        }

        // Per-request timeouts come from CompletionRequest; only connect is bounded here.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Initializing Ollama backend: url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// Create from the `OLLAMA_BASE` environment variable.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OLLAMA_BASE").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        Self::new(base_url)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Chat API message for `/api/chat`.
#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Sampling options forwarded to the model.
#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

/// Request payload for the Ollama `/api/chat` endpoint.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

/// Response from the Ollama `/api/chat` endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

impl ChatRequest {
    fn from_completion(request: &CompletionRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !request.system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: request.system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        Self {
            model: request.model.clone(),
            messages,
            stream: false,
            options: ChatOptions {
                temperature: request.temperature,
            },
        }
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    #[instrument(skip(self, request), fields(subsystem = "inference", component = "ollama", op = "complete", model = %request.model, prompt_len = request.prompt.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let start = Instant::now();
        let payload = ChatRequest::from_completion(request);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(request.timeout)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ExtractionBackend(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        // Transport and envelope failures both surface as ExtractionBackend.
        let result: ChatResponse = response.json().await?;

        let content = result.message.content;
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            { RESPONSE_LEN } = content.len(),
            { DURATION_MS } = elapsed,
            "Completion finished"
        );
        if elapsed > defaults::SLOW_GENERATION_MS {
            warn!(
                { DURATION_MS } = elapsed,
                { PROMPT_LEN } = request.prompt.len(),
                { SLOW } = true,
                "Slow completion operation"
            );
        }
        Ok(content)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    debug!("Ollama health check passed");
                    Ok(true)
                } else {
                    warn!("Ollama health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("Ollama health check error: {}", e);
                Ok(false)
            }
        }
    }

    fn backend_name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(system: &str) -> CompletionRequest {
        CompletionRequest {
            model: "llama3".to_string(),
            system: system.to_string(),
            prompt: "Hello".to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_default_url_is_localhost() {
        assert!(DEFAULT_OLLAMA_URL.contains("localhost"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let backend = OllamaBackend::new("http://custom:1234/").unwrap();
        assert_eq!(backend.base_url(), "http://custom:1234");
    }

    #[test]
    fn test_new_rejects_empty_url() {
        assert!(matches!(OllamaBackend::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn test_backend_name() {
        let backend = OllamaBackend::new("http://test").unwrap();
        assert_eq!(backend.backend_name(), "ollama");
    }

    #[test]
    fn test_chat_request_serialization() {
        let payload = ChatRequest::from_completion(&request("Be helpful"));
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("llama3"));
        assert!(json.contains("Hello"));
        assert!(json.contains("Be helpful"));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("\"temperature\":0.0"));
    }

    #[test]
    fn test_chat_request_omits_empty_system() {
        let payload = ChatRequest::from_completion(&request(""));
        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.messages[0].role, "user");
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{"model":"llama3","message":{"role":"assistant","content":"- review PR"},"done":true}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.content, "- review PR");
    }
}
