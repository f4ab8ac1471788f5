//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /api/health`: process is up.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: agora_core::version(),
    })
}
