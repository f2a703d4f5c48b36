// src/logging_middleware.rs
//! Middleware for logging JSON request and response bodies at debug level

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, Level};

/// Bodies longer than this are cut before logging
const MAX_LOGGED_BODY_CHARS: usize = 2000;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.starts_with("application/json"))
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_LOGGED_BODY_CHARS {
        let head: String = body.chars().take(MAX_LOGGED_BODY_CHARS).collect();
        format!("{}... [truncated]", head)
    } else {
        body.to_string()
    }
}

/// Logs `/api` JSON bodies when debug logging is on; other traffic passes through untouched
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !tracing::enabled!(Level::DEBUG) || !request.uri().path().starts_with("/api") {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let request = if is_json(&parts.headers) {
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            if !body_str.is_empty() {
                debug!(
                    method = %parts.method,
                    uri = %parts.uri,
                    request_body = %truncate_body(body_str),
                    "Request"
                );
            }
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        Request::from_parts(parts, body)
    };

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    if !is_json(&parts.headers) {
        return Ok(Response::from_parts(parts, body));
    }

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if let Ok(body_str) = std::str::from_utf8(&bytes) {
        debug!(
            status = %parts.status,
            response_body = %truncate_body(body_str),
            "Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
