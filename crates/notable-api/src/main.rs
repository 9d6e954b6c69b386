//! notable API server.

use std::sync::Arc;

use tracing::info;

use notable_api::logging::{init_tracing, LogSettings};
use notable_api::{router, AppState, ServerConfig};
use notable_inference::{CompletionConfig, OllamaBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log = LogSettings::from_env();
    let _log_guard = init_tracing(&log);
    info!(
        log_format = log.format.as_str(),
        log_file = ?log.file,
        "Logging initialized"
    );

    let server = ServerConfig::from_env()?;
    let completion = CompletionConfig::from_env();
    let backend = OllamaBackend::from_env()?;

    info!(
        model = %completion.model,
        temperature = completion.temperature,
        timeout_secs = completion.timeout.as_secs(),
        ollama = backend.base_url(),
        "Completion backend configured"
    );

    let state = AppState::new(Arc::new(backend), completion);
    let app = router(state);

    let addr = server.socket_addr()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
