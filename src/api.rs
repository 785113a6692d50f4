//! HTTP API surface for the translation service.
//!
//! This module owns routing, body parsing, and response shaping while
//! delegating the translation contract to [`TranslationEngine`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use crate::engine::{TranslationEngine, TranslationRequest, TranslationResponse};
use crate::error::AppError;

/// Human-readable service name returned by status endpoints.
pub const APP_NAME: &str = "nmt-service";
/// Service version string returned by status endpoints.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder model identifier held in process state.
const SIMULATED_MODEL: &str = "simulated_model";

/// Shared state injected into all route handlers.
pub struct AppState {
    /// Translation pipeline shared by all requests.
    pub engine: TranslationEngine,
    /// Placeholder NMT model handle, set once at startup.
    model: Option<&'static str>,
}

impl AppState {
    /// Constructs shared handler state with the placeholder model "loaded".
    pub fn new(engine: TranslationEngine) -> Self {
        Self {
            engine,
            model: Some(SIMULATED_MODEL),
        }
    }
}

/// Builds the Axum router for all public endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Root status endpoint (`GET /`).
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("{APP_NAME} running"),
        "version": APP_VERSION,
        "status": "ready",
    }))
}

/// Liveness endpoint (`GET /health`).
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "model_loaded": state.model.is_some(),
        "delegate_enabled": state.engine.delegate_enabled(),
    }))
}

/// Translation endpoint (`POST /translate`).
///
/// Body rejections (malformed JSON, missing fields) are mapped to `422`;
/// semantic validation failures inside the engine surface as `400`.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::unprocessable(rejection.body_text()))?;

    info!(
        source_lang = %request.source_lang,
        target_lang = %request.target_lang,
        "handling translation request"
    );

    let response = state.engine.translate(&request).await?;

    info!(
        confidence_score = response.confidence_score,
        "translation completed"
    );
    Ok(Json(response))
}
