//! HTTP Middleware
//!
//! Error logging plus per-client rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use super::rate_limit::RouteClass;
use super::state::AppState;

/// Error logging middleware
///
/// Intercepts responses and logs 4xx as warnings, 5xx as errors. Business
/// error payloads are logged at the point they convert in ApiError.
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// Rate limiting middleware
///
/// Picks the quota class from the request path, keys by client IP, and
/// rejects with 429 + retry-after when the budget is exhausted.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let class = RouteClass::from_path(request.uri().path());
    let key = client_key(&request);

    match state.rate_limiters.check(class, &key) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::warn!(
                client = %key,
                path = %request.uri().path(),
                retry_after,
                "Rate limit exceeded"
            );
            ApiError::TooManyRequests(retry_after).into_response()
        }
    }
}

/// Client identity for rate limiting
///
/// Prefers the first x-forwarded-for hop, falls back to the socket address.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
