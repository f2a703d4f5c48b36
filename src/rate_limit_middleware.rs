// rate_limit_middleware.rs
use crate::auth::tokens::verified_subject;
use crate::common::{AppState, AuthConfig};
use crate::services::rate_limit::{RateLimitBucket, RateLimitResult, RateLimitService};
use axum::{
    extract::{ConnectInfo, Extension, Request},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Serialize)]
struct RateLimitErrorResponse {
    error: String,
    code: String,
    retry_after: u32,
}

/// Extract IP address from request
fn extract_ip_address(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    // Proxied requests carry the client first in X-Forwarded-For
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return Some(first_ip.trim().to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    connect_info.map(|info| info.0.ip().to_string())
}

/// Signed-in clients are keyed by the verified token subject. Anything else,
/// including a bearer token that fails verification, is keyed by IP.
fn extract_user_identifier(headers: &HeaderMap, auth: Option<&AuthConfig>) -> Option<String> {
    let auth = auth?;
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| verified_subject(auth, token.trim()))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    Extension(rate_limit_service): Extension<Arc<RateLimitService>>,
    state: Option<Extension<Arc<RwLock<AppState>>>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth = match &state {
        Some(Extension(state_lock)) => Some(state_lock.read().await.auth.clone()),
        None => None,
    };

    let headers = request.headers();
    let ip_address = extract_ip_address(headers, connect_info.as_ref());

    let identifier = extract_user_identifier(headers, auth.as_ref())
        .or_else(|| ip_address.clone().map(|ip| format!("anon:{}", ip)))
        .unwrap_or_else(|| "unknown".to_string());

    let path = request.uri().path().to_string();
    let bucket = RateLimitBucket::for_path(&path);

    match rate_limit_service
        .check_rate_limit(&identifier, ip_address.as_deref(), bucket)
        .await
    {
        RateLimitResult::Allowed => {
            debug!(
                identifier = %identifier,
                path = %path,
                bucket = ?bucket,
                "Request allowed by rate limiter"
            );
            Ok(next.run(request).await)
        }
        RateLimitResult::Limited { retry_after } => {
            warn!(
                identifier = %identifier,
                path = %path,
                retry_after = retry_after,
                "Request blocked by rate limiter"
            );
            rate_limit_service.log_violation(&identifier, ip_address.as_deref(), &path);

            let error_response = RateLimitErrorResponse {
                error: "Rate limit exceeded. Please try again later.".to_string(),
                code: "RATE_LIMIT_EXCEEDED".to_string(),
                retry_after,
            };

            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, Json(error_response)).into_response();

            if let Ok(retry_header) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert("retry-after", retry_header);
            }

            Err(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::create_user_token;
    use crate::common::test_support::{seed_user, test_app, test_state};
    use crate::services::rate_limit::RateLimitConfig;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_extract_ip_from_x_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.1, 198.51.100.1".parse().unwrap(),
        );

        let ip = extract_ip_address(&headers, None);
        assert_eq!(ip, Some("203.0.113.1".to_string()));
    }

    #[test]
    fn test_extract_ip_from_x_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "203.0.113.1".parse().unwrap());

        assert_eq!(extract_ip_address(&headers, None), Some("203.0.113.1".to_string()));
    }

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "limiter-secret".to_string(),
            admin_token_expire_minutes: 60,
            user_token_expire_days: 1,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    #[test]
    fn test_only_verified_tokens_identify_a_client() {
        let auth = auth_config();
        let token = create_user_token(&auth, "U_ALICE1").unwrap();

        assert_eq!(
            extract_user_identifier(&bearer(&token), Some(&auth)),
            Some("user:U_ALICE1".to_string())
        );
        assert!(extract_user_identifier(&bearer("junk-not-a-jwt-00000001"), Some(&auth)).is_none());
        assert!(extract_user_identifier(&bearer(&token), None).is_none());

        let other = AuthConfig {
            jwt_secret: "someone-else".to_string(),
            ..auth_config()
        };
        let forged = create_user_token(&other, "U_ALICE1").unwrap();
        assert!(extract_user_identifier(&bearer(&forged), Some(&auth)).is_none());
    }

    #[tokio::test]
    async fn test_limited_request_gets_429_with_retry_after() {
        let service = Arc::new(RateLimitService::new(RateLimitConfig {
            enabled: true,
            requests_per_minute: 1,
            ai_requests_per_minute: 1,
            window_seconds: 60,
            whitelist_ips: Vec::new(),
        }));
        let app = Router::new()
            .route("/api/public/jobs", get(|| async { "ok" }))
            .layer(middleware::from_fn(rate_limit_middleware))
            .layer(Extension(service));

        let request = || {
            HttpRequest::builder()
                .uri("/api/public/jobs")
                .header("x-real-ip", "198.51.100.7")
                .body(Body::empty())
                .unwrap()
        };

        let first = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(request()).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("retry-after"));
    }

    async fn post_resume_analysis(app: &Router, token: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/public-ai/analyze-resume")
            .header("x-real-ip", "198.51.100.9")
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"resume_text": ""}"#))
            .unwrap();
        app.clone().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_unverified_tokens_share_the_ip_bucket() {
        let mut state = test_state().await;
        state.rate_limit_service = Arc::new(RateLimitService::new(RateLimitConfig {
            enabled: true,
            requests_per_minute: 100,
            ai_requests_per_minute: 3,
            window_seconds: 60,
            whitelist_ips: Vec::new(),
        }));
        let app = test_app(&state);

        let mut statuses = Vec::new();
        for i in 0..10 {
            statuses.push(post_resume_analysis(&app, &format!("junk-not-a-jwt-{:08}", i)).await);
        }
        assert!(statuses[..3].iter().all(|s| *s != StatusCode::TOO_MANY_REQUESTS));
        assert!(statuses[3..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
    }

    #[tokio::test]
    async fn test_signed_in_users_behind_one_ip_have_own_buckets() {
        let mut state = test_state().await;
        state.rate_limit_service = Arc::new(RateLimitService::new(RateLimitConfig {
            enabled: true,
            requests_per_minute: 100,
            ai_requests_per_minute: 1,
            window_seconds: 60,
            whitelist_ips: Vec::new(),
        }));
        let (_, alice) = seed_user(&state, "alice@talentd.test").await;
        let (_, bob) = seed_user(&state, "bob@talentd.test").await;
        let app = test_app(&state);

        assert_ne!(post_resume_analysis(&app, &alice).await, StatusCode::TOO_MANY_REQUESTS);
        assert_ne!(post_resume_analysis(&app, &bob).await, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(post_resume_analysis(&app, &alice).await, StatusCode::TOO_MANY_REQUESTS);
    }
}
