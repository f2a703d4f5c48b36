// Shared fixtures for handler tests: an in-memory database, seeded accounts
// and a helper that drives the full router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tower::ServiceExt;

use super::dev_mode::DevModeConfig;
use super::migrations::run_migrations;
use super::state::{AppState, AuthConfig};
use crate::auth::password::hash_password;
use crate::auth::tokens::{create_admin_token, create_user_token};
use crate::common::{generate_id, generate_user_id, now_timestamp, EntityPrefix};
use crate::services::{
    ExpirationConfig, ExpirationService, GoogleService, LlmService, RateLimitConfig,
    RateLimitService, SettingsService,
};

/// Single connection: every pooled connection to `sqlite::memory:` is its own database
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// App state with rate limiting off and no LLM or Google credentials
pub async fn test_state() -> AppState {
    let pool = test_pool().await;

    let settings_service = Arc::new(SettingsService::new(pool.clone()));
    // Blank rows shadow any LLM_API_KEY / GOOGLE_CLIENT_ID in the environment
    settings_service.set_setting("llm_api_key", "", None, None).await.unwrap();
    settings_service.set_setting("google_client_id", "", None, None).await.unwrap();

    AppState {
        db: pool.clone(),
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            admin_token_expire_minutes: 1440,
            user_token_expire_days: 7,
        },
        share_base_url: "https://talentd.test".to_string(),
        dev_mode: DevModeConfig::default(),
        llm_service: Arc::new(LlmService::new(settings_service.clone())),
        google_service: Arc::new(GoogleService::new(settings_service.clone())),
        rate_limit_service: Arc::new(RateLimitService::new(RateLimitConfig::disabled())),
        expiration_service: Arc::new(ExpirationService::new(pool, ExpirationConfig::default())),
        settings_service,
    }
}

pub fn test_app(state: &AppState) -> Router {
    crate::build_router(state.clone())
}

/// Inserts an active admin and returns a token for it
pub async fn seed_admin(state: &AppState, username: &str, is_superuser: bool) -> String {
    sqlx::query(
        "INSERT INTO admin_users (id, username, email, hashed_password, is_active, is_superuser, created_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(generate_id(EntityPrefix::Admin))
    .bind(username)
    .bind(format!("{}@talentd.test", username))
    .bind(hash_password("secret123").unwrap())
    .bind(i64::from(is_superuser))
    .bind(now_timestamp())
    .execute(&state.db)
    .await
    .unwrap();

    create_admin_token(&state.auth, username).unwrap()
}

/// Inserts a user and returns `(user_id, token)`
pub async fn seed_user(state: &AppState, email: &str) -> (String, String) {
    let id = generate_user_id();
    sqlx::query("INSERT INTO users (id, email, name, google_id, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind("Test User")
        .bind(format!("g-{}", id))
        .bind(now_timestamp())
        .execute(&state.db)
        .await
        .unwrap();

    let token = create_user_token(&state.auth, &id).unwrap();
    (id, token)
}

/// Sends one request through the router. Non-JSON bodies come back as `Value::String`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}

/// Posts a multipart form with one `file` part plus plain text fields
pub async fn send_multipart(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    filename: &str,
    content: &[u8],
    fields: &[(&str, &str)],
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "talentd-test-boundary";

    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder().method(Method::POST).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}
