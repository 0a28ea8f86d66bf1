use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::error::GatewayError;

use super::dto::ErrorResponse;

pub(crate) fn map_error(err: GatewayError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, details) = match &err {
        GatewayError::BackendStatus {
            service, status, ..
        } => (
            StatusCode::BAD_GATEWAY,
            Some(json!({ "service": service, "status": status.as_u16() })),
        ),
        GatewayError::Network(_) => (StatusCode::BAD_GATEWAY, None),
        GatewayError::TaskSubmission { status, body } => (
            StatusCode::BAD_GATEWAY,
            Some(json!({ "status": status.as_u16(), "body": body })),
        ),
        GatewayError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, None),
        GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, None),
        GatewayError::Serialization(_)
        | GatewayError::Config(_)
        | GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };

    let body = ErrorResponse {
        error: err.to_string(),
        details,
    };

    (status, Json(body))
}
