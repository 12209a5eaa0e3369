use crate::error::HealthResponse;
use axum::{http::StatusCode, Json};

/// GET /health handler - Liveness check
///
/// Sits outside the page route table so it answers regardless of the
/// mount prefix.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!("Health check passed");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}
