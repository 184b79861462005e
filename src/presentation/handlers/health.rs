use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage_reachable: bool,
    pub extraction_provider: String,
}

/// Always 200: a storage outage degrades persistence, not the service.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storage_reachable = state.pipeline.storage_reachable();
    let status = if storage_reachable {
        "healthy"
    } else {
        "degraded"
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            storage_reachable,
            extraction_provider: state.pipeline.provider().to_string(),
        }),
    )
}
