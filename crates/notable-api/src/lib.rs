//! # notable-api
//!
//! HTTP surface over the extraction core. Each extracted item is returned
//! with a sequential id: `{"items": [{"id": 1, "text": "..."}]}`.
//!
//! | Method | Path | Extractor |
//! |--------|------|-----------|
//! | POST | `/action-items/extract` | heuristic (or `?mode=llm`) |
//! | POST | `/action-items/extract-llm` | model |
//! | POST | `/notes/hashtags` | hashtag extraction |
//! | GET | `/health` | backend health check |

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use notable_core::defaults;
use notable_core::{ActionItemExtractor, CompletionBackend};
use notable_extract::{HeuristicExtractor, ModelExtractor};
use notable_inference::CompletionConfig;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared handler state. Extractors are stateless and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub heuristic: Arc<dyn ActionItemExtractor>,
    pub model: Arc<dyn ActionItemExtractor>,
    pub backend: Arc<dyn CompletionBackend>,
}

impl AppState {
    /// Wire both extractors around one completion backend.
    pub fn new(backend: Arc<dyn CompletionBackend>, completion: CompletionConfig) -> Self {
        let model = ModelExtractor::new(Arc::clone(&backend), completion);
        Self {
            heuristic: Arc::new(HeuristicExtractor::new()),
            model: Arc::new(model),
            backend,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/action-items/extract", post(handlers::extract))
        .route("/action-items/extract-llm", post(handlers::extract_llm))
        .route("/notes/hashtags", post(handlers::hashtags))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_BYTES))
        .with_state(state)
}
