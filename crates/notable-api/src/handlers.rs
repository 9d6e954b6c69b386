//! Request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{field, info, warn};

use notable_core::logging::{DURATION_MS, ERROR_MSG, MODE, RESULT_COUNT, SUBSYSTEM};
use notable_core::{ActionItemExtractor, ExtractedItem, ExtractionMode};
use notable_extract::extract_hashtags;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractQuery {
    pub mode: Option<ExtractionMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub items: Vec<ExtractedItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HashtagResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub backend_available: bool,
}

/// `POST /action-items/extract` - heuristic unless `?mode=llm`.
pub async fn extract(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mode = query.mode.unwrap_or_default();
    run_extraction(&state, mode, &req.text).await
}

/// `POST /action-items/extract-llm` - always the model path.
pub async fn extract_llm(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    run_extraction(&state, ExtractionMode::Llm, &req.text).await
}

async fn run_extraction(
    state: &AppState,
    mode: ExtractionMode,
    text: &str,
) -> Result<Json<ExtractResponse>, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is required".to_string()));
    }

    let extractor: &Arc<dyn ActionItemExtractor> = match mode {
        ExtractionMode::Heuristic => &state.heuristic,
        ExtractionMode::Llm => &state.model,
    };

    let start = Instant::now();
    let items = extractor.extract(text).await.map_err(|e| {
        warn!(
            { SUBSYSTEM } = "api",
            { MODE } = mode.as_str(),
            { ERROR_MSG } = field::display(&e),
            "Extraction failed"
        );
        ApiError::from(e)
    })?;

    info!(
        { SUBSYSTEM } = "api",
        { MODE } = mode.as_str(),
        extractor = extractor.name(),
        { RESULT_COUNT } = items.len(),
        { DURATION_MS } = start.elapsed().as_millis() as u64,
        "Extraction complete"
    );

    Ok(Json(ExtractResponse {
        items: ExtractedItem::number(items),
    }))
}

/// `POST /notes/hashtags`
pub async fn hashtags(Json(req): Json<TextRequest>) -> Json<HashtagResponse> {
    Json(HashtagResponse {
        tags: extract_hashtags(&req.text),
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_available = state.backend.health_check().await.unwrap_or(false);
    Json(HealthResponse {
        status: "ok".to_string(),
        backend: state.backend.backend_name().to_string(),
        backend_available,
    })
}
