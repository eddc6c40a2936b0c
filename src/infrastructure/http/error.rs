//! HTTP error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, FieldError};

/// Unified error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// API error
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input, with field-level detail
    Validation(Vec<FieldError>),
    /// Required upstream not configured or unreachable
    ServiceUnavailable(String),
    /// Request admission rejected; carries retry-after seconds
    TooManyRequests(u64),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => {
                tracing::warn!(fields = details.len(), "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::with_details("Validation failed", details)),
                )
                    .into_response()
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response()
            }
            ApiError::TooManyRequests(retry_after) => {
                tracing::warn!(retry_after, "Rate limit exceeded");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("retry-after", retry_after.to_string())],
                    Json(ErrorResponse::new(
                        "Too many requests, please try again later",
                    )),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response()
            }
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Validation { details } => ApiError::Validation(details),
            ApplicationError::UpstreamUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError =
            ApplicationError::validation("prompt", "Prompt is required").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_unavailable_maps_to_503() {
        let err: ApiError = ApplicationError::upstream_unavailable("no key").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let response = ApiError::TooManyRequests(30).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("retry-after").unwrap(), "30");
    }
}
