use crate::ai::client::ModelCaller;
use crate::ai::schema_utils;
use crate::config::Settings;
use crate::core::document::GameDocument;
use crate::orchestrator::{DebugTrace, Orchestrator};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

pub const API_VERSION: &str = "1.0.0";

pub struct AppState<C> {
    pub orchestrator: Arc<Orchestrator<C>>,
    pub settings: Arc<Settings>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            settings: self.settings.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Error envelope: `{ "detail": ... }` with a 500 status.
pub struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0 })),
        )
            .into_response()
    }
}

pub fn build_router<C: ModelCaller + 'static>(state: AppState<C>) -> Router {
    let cors = cors_layer(&state.settings);
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::<C>))
        .route("/generate", post(generate::<C>))
        .route("/generate/debug", post(generate_debug::<C>))
        .route("/schema", get(schema))
        .with_state(state)
        .layer(cors)
}

/// Credentials are allowed, so `*` mirrors the caller's origin rather than
/// answering with a literal wildcard.
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins = if settings.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            settings
                .allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "GameGPT Backend API",
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": API_VERSION
    }))
}

async fn health<C: ModelCaller + 'static>(State(state): State<AppState<C>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "services": {
            "llm": state.orchestrator.client().health(),
            "prompt_builder": { "status": "healthy", "service": "prompt_builder" },
            "response_processor": { "status": "healthy", "service": "response_processor" }
        }
    }))
}

async fn generate<C: ModelCaller + 'static>(
    State(state): State<AppState<C>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GameDocument>, ApiError> {
    state
        .orchestrator
        .generate_game(&req.prompt)
        .await
        .map(Json)
        .map_err(|e| {
            log::error!("Error generating game: {e}");
            ApiError(format!("Failed to generate game: {e}"))
        })
}

async fn generate_debug<C: ModelCaller + 'static>(
    State(state): State<AppState<C>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<DebugTrace>, ApiError> {
    state
        .orchestrator
        .generate_game_debug(&req.prompt)
        .await
        .map(Json)
        .map_err(|e| {
            log::error!("Debug generation error: {e}");
            ApiError(format!("Debug generation failed: {e}"))
        })
}

async fn schema() -> Result<Json<Value>, ApiError> {
    schema_utils::document_schema()
        .map(Json)
        .map_err(|e| ApiError(format!("Failed to build schema: {e}")))
}
