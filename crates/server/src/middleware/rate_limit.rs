//! Rate limiting middleware.
//!
//! Fixed-window counters keyed by request path and client IP, held in the
//! key-value store. Store failures deny the request.

use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use common::AppError;

use crate::state::AppState;

/// Rate limit middleware for API endpoints.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let max_requests = state.config.rate_limit.max_requests;
    let window_seconds = state.config.rate_limit.window_seconds;

    let ip = client_ip(request.headers(), connect_info);
    // Nested routers see a stripped uri; key on the full path
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let identifier = format!("{}:{}", path, ip);

    let (count, allowed) = match state
        .kv
        .check_rate_limit(&identifier, max_requests, window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            warn!("Rate limit check failed for {}: {}", identifier, e);
            return rate_limit_exceeded_response(max_requests, window_seconds);
        }
    };

    if !allowed {
        let retry_after = state
            .kv
            .get_rate_limit_ttl(&identifier)
            .await
            .ok()
            .flatten()
            .map(|ttl| ttl.max(1) as u64)
            .unwrap_or(window_seconds);
        return rate_limit_exceeded_response(max_requests, retry_after);
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(max_requests.saturating_sub(count)),
    );

    response
}

fn client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    // Try X-Forwarded-For header first
    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
    {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(max_requests: u64, retry_after: u64) -> Response {
    let mut response = AppError::TooManyRequests.into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(retry_after));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));

    response
}
