//! Translation of service results into HTTP responses.
//!
//! Every JSON response body is an [`ApiResponse`] envelope. Errors keep
//! their message and, for validation failures, the list of field messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use serde::Serialize;
use shared::ApiResponse;

use crate::domain::ServiceError;

pub fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Http { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ServiceError::Network(_) | ServiceError::Decode(_) => StatusCode::BAD_GATEWAY,
        ServiceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: ServiceError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        warn!("Request rejected ({}): {}", status.as_u16(), error);
    }

    let body = ApiResponse::<()>::failure(error.to_string()).with_errors(error.field_errors());
    (status, Json(body)).into_response()
}

/// Wrap a successful value in an envelope with `status`, or the error in a
/// failure envelope
pub fn respond<T: Serialize>(result: Result<T, ServiceError>, status: StatusCode) -> Response {
    match result {
        Ok(data) => (status, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => error_response(e),
    }
}

pub fn respond_with_message<T: Serialize>(
    result: Result<T, ServiceError>,
    status: StatusCode,
    message: impl Into<String>,
) -> Response {
    match result {
        Ok(data) => (status, Json(ApiResponse::ok_with_message(data, message))).into_response(),
        Err(e) => error_response(e),
    }
}
