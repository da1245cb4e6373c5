use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::decode;
use crate::error::SimplifyError;
use crate::gemini::{CompletionService, SIMPLIFY_PROMPT};
use crate::mock::MOCK_ANALYSIS;
use crate::models::{HealthResponse, PageAnalysis, SimplifyRequest, SimplifyResponse};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Read-only state established once at startup. The completion service is
/// `None` when no API key was configured; the handler then short-circuits
/// without attempting network access.
pub struct AppState {
    pub config: AppConfig,
    pub completion: Option<Arc<dyn CompletionService>>,
}

// ── Router ───────────────────────────────────────────────────────────────────

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/simplify", post(simplify))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Page simplifier is alive".to_string(),
        api_key_present: state.config.api_key_present(),
    })
}

async fn simplify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimplifyRequest>,
) -> Json<SimplifyResponse> {
    tracing::info!("receiving screenshot request");

    // Mock mode never touches the payload, so an empty or garbage
    // `image_data` still gets the canned analysis.
    if state.config.use_mock {
        tracing::warn!("mock mode enabled, returning canned analysis");
        return Json(SimplifyResponse::Success {
            data: MOCK_ANALYSIS.clone(),
        });
    }

    match analyze(&state, &req.image_data).await {
        Ok(data) => Json(SimplifyResponse::Success { data }),
        Err(e) => {
            tracing::error!("simplify request failed: {}", e);
            Json(SimplifyResponse::Error {
                message: e.to_string(),
            })
        }
    }
}

async fn analyze(state: &AppState, image_data: &str) -> Result<PageAnalysis, SimplifyError> {
    let completion = state
        .completion
        .as_ref()
        .ok_or(SimplifyError::MissingApiKey)?;

    let decoded = decode::decode_image(image_data)?;
    tracing::info!(
        width = decoded.width,
        height = decoded.height,
        mime = decoded.mime_type,
        "sending screenshot to completion service"
    );

    let text = completion
        .complete(SIMPLIFY_PROMPT, &decoded.bytes, decoded.mime_type)
        .await?;

    serde_json::from_str(&text)
        .map_err(|e| SimplifyError::MalformedOutput(format!("Model returned invalid JSON: {}", e)))
}
