use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::route_table::RoutingError;

/// Error response type
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Custom error type for page endpoints
///
/// Unmatched paths become 404s. Any other routing failure inside a handler
/// means the route table is wired wrong, so it is reported as a 500.
#[derive(Debug)]
pub enum ApiError {
    /// No route matches the request path
    NotFound(String),
    /// Route table misuse (unknown name, bad reverse parameters)
    Routing(RoutingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("Page not found: {}", path),
            ),
            ApiError::Routing(err) => {
                tracing::error!("Route table misconfigured: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Routing error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::NotFound(path) => ApiError::NotFound(path),
            other => ApiError::Routing(other),
        }
    }
}
