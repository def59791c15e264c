//! HTTP surface for the remediation service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mend_adapters::Config;
use mend_core::protocol::{Generator, Scanner};
use mend_core::{RemediationError, RemediationRequest};
use mend_engine::{CliScanner, OllamaGenerator, Orchestrator};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub struct AppState {
    pub config: Config,
    generator: OllamaGenerator,
    scanner: CliScanner,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let generator = OllamaGenerator::new(&config.generator)?;
        let scanner = CliScanner::new(&config.scanner);
        Ok(Self {
            config,
            generator,
            scanner,
        })
    }
}

#[derive(Serialize)]
struct RemediationResponse {
    remediated_code: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/remediation", post(remediate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn remediate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RemediationRequest>,
) -> Result<Json<RemediationResponse>, ApiError> {
    let orchestrator = Orchestrator::new(
        &state.generator,
        &state.scanner,
        &state.config.remediation,
    );
    let remediation = orchestrator.remediate(&request).await?;
    Ok(Json(RemediationResponse {
        remediated_code: remediation.code,
    }))
}

/// Liveness endpoint. Dependency health is observed and logged but never
/// propagated as a failure of this endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    if !state.generator.health_check().await {
        warn!("model service is not healthy");
    }
    if !state.scanner.health_check().await {
        warn!("scanner is not healthy");
    }
    Json(HealthResponse { status: "healthy" })
}

struct ApiError(RemediationError);

impl From<RemediationError> for ApiError {
    fn from(err: RemediationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        (
            status,
            Json(ErrorBody {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Status mapping distinguishes "your input is wrong" (400), "we could
/// not produce a verifiably-fixed snippet" (422), and "the tooling
/// malfunctioned" (500).
fn status_for(err: &RemediationError) -> StatusCode {
    match err {
        RemediationError::UnsupportedLanguage { .. } => StatusCode::BAD_REQUEST,
        RemediationError::Exhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RemediationError::GenerationFailed { .. }
        | RemediationError::EmptyGeneration
        | RemediationError::ScanFailed { .. }
        | RemediationError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
