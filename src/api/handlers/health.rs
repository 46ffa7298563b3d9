use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /
///
/// Welcome banner, kept for devices that probe the API root.
pub async fn welcome() -> impl IntoResponse {
    (StatusCode::OK, "Bienvenido a la API")
}

/// GET /health
///
/// Simple health check endpoint for monitoring service status.
/// Returns "ok" status and application version.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
