use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{ApiResponse, HealthResponse};

/// Liveness check; reachable without a token
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(ApiResponse::ok(body))).into_response()
}
