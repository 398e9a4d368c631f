//! Error types for the gateway
//!
//! Client-visible errors are serialized as a flat `{ "error": "<message>" }`
//! object. Upstream failure details are logged server-side and never leaked
//! into response bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream provider could not be reached")]
    UpstreamUnreachable,

    #[error("Upstream response could not be relayed")]
    RelayFailed,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::UpstreamUnreachable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred while contacting the provider".to_string(),
            ),
            AppError::RelayFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred while relaying the provider response".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_maps_to_400_with_flat_error_body() {
        let response = AppError::BadRequest("Missing 'path' parameter".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing 'path' parameter");
    }

    #[tokio::test]
    async fn upstream_unreachable_hides_details() {
        let response = AppError::UpstreamUnreachable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("internal error"));
    }

    #[tokio::test]
    async fn relay_failure_maps_to_500() {
        let response = AppError::RelayFailed.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
