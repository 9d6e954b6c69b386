//! Integration tests for the Ollama completion backend against a mock server.

#![cfg(feature = "ollama")]

use std::time::Duration;

use notable_core::{CompletionBackend, CompletionRequest, Error};
use notable_inference::{CompletionConfig, OllamaBackend};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "llama3.1:8b",
        "created_at": "2026-01-01T00:00:00Z",
        "message": { "role": "assistant", "content": content },
        "done": true
    })
}

fn request(timeout: Duration) -> CompletionRequest {
    CompletionConfig::default()
        .with_timeout(timeout)
        .request("Extract action items.", "TODO: review PR")
}

#[tokio::test]
async fn test_complete_returns_message_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3.1:8b",
            "stream": false,
            "options": { "temperature": 0.0 }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body("- review PR\n- update docs\n")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = OllamaBackend::new(mock_server.uri()).unwrap();
    let text = backend
        .complete(&request(Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(text, "- review PR\n- update docs\n");
}

#[tokio::test]
async fn test_complete_non_success_status_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&mock_server)
        .await;

    let backend = OllamaBackend::new(mock_server.uri()).unwrap();
    let err = backend
        .complete(&request(Duration::from_secs(5)))
        .await
        .unwrap_err();

    match err {
        Error::ExtractionBackend(msg) => {
            assert!(msg.contains("500"), "unexpected message: {}", msg);
            assert!(msg.contains("model not loaded"));
        }
        other => panic!("Expected ExtractionBackend, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_timeout_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("- too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let backend = OllamaBackend::new(mock_server.uri()).unwrap();
    let err = backend
        .complete(&request(Duration::from_millis(200)))
        .await
        .unwrap_err();

    match err {
        Error::ExtractionBackend(msg) => assert!(msg.contains("timed out"), "{}", msg),
        other => panic!("Expected ExtractionBackend, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_malformed_envelope_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let backend = OllamaBackend::new(mock_server.uri()).unwrap();
    let err = backend
        .complete(&request(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ExtractionBackend(_)));
}

#[tokio::test]
async fn test_complete_unreachable_is_backend_error() {
    // Port 9 (discard) is not expected to run an HTTP server.
    let backend = OllamaBackend::new("http://127.0.0.1:9").unwrap();
    let err = backend
        .complete(&request(Duration::from_secs(2)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ExtractionBackend(_)));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .mount(&mock_server)
        .await;

    let backend = OllamaBackend::new(mock_server.uri()).unwrap();
    assert!(backend.health_check().await.unwrap());

    let down = OllamaBackend::new("http://127.0.0.1:9").unwrap();
    assert!(!down.health_check().await.unwrap());
}
