//! Admin login and account management

use axum::extract::{Extension, Json};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::extractors::AuthedAdmin;
use crate::auth::models::{
    AdminTokenResponse, AdminUser, AdminUserResponse, LoginRequest, RegisterAdminRequest,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::create_admin_token;
use crate::common::{
    generate_id, now_timestamp, safe_email_log, ApiError, AppState, EntityPrefix,
    ValidationResult,
};

fn token_response(state: &AppState, admin: AdminUser) -> Result<AdminTokenResponse, ApiError> {
    let access_token = create_admin_token(&state.auth, &admin.username)?;
    Ok(AdminTokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.auth.admin_token_expire_minutes * 60,
        user: admin.into(),
    })
}

/// POST /api/auth/login
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AdminTokenResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let admin = sqlx::query_as::<_, AdminUser>(
        "SELECT * FROM admin_users WHERE username = ? AND is_active = 1",
    )
    .bind(payload.username.trim())
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error during admin login");
        ApiError::DatabaseError(e)
    })?;

    let mut admin = match admin {
        Some(a) if verify_password(&payload.password, &a.hashed_password) => a,
        _ => {
            warn!(username = %payload.username, "Admin login failed");
            return Err(ApiError::Unauthorized(
                "Incorrect username or password".to_string(),
            ));
        }
    };

    let now = now_timestamp();
    sqlx::query("UPDATE admin_users SET last_login = ? WHERE id = ?")
        .bind(&now)
        .bind(&admin.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    admin.last_login = Some(now);

    info!(admin = %admin.username, "Admin logged in");
    Ok(Json(token_response(&state, admin)?))
}

/// POST /api/auth/register (superuser only)
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(current): AuthedAdmin,
    Json(payload): Json<RegisterAdminRequest>,
) -> Result<Json<AdminUserResponse>, ApiError> {
    if current.is_superuser == 0 {
        warn!(admin = %current.username, "Non-superuser attempted to register an admin");
        return Err(ApiError::Forbidden("Not enough permissions".to_string()));
    }

    let mut validation = ValidationResult::new();
    validation.require_text("username", "Username", &payload.username, 50);
    if payload.username.trim().chars().count() < 3 {
        validation.add_error("username", "Username must be at least 3 characters");
    }
    if !payload.email.contains('@') {
        validation.add_error("email", "Invalid email address");
    }
    if payload.password.chars().count() < 6 {
        validation.add_error("password", "Password must be at least 6 characters");
    }
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    let username_taken: Option<String> =
        sqlx::query_scalar("SELECT id FROM admin_users WHERE username = ?")
            .bind(&username)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    if username_taken.is_some() {
        return Err(ApiError::BadRequest("Username already registered".to_string()));
    }

    let email_taken: Option<String> =
        sqlx::query_scalar("SELECT id FROM admin_users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    if email_taken.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let admin = AdminUser {
        id: generate_id(EntityPrefix::Admin),
        username,
        email,
        hashed_password: hash_password(&payload.password)?,
        is_active: 1,
        is_superuser: i64::from(payload.is_superuser),
        created_at: Some(now_timestamp()),
        last_login: None,
    };

    sqlx::query(
        "INSERT INTO admin_users (id, username, email, hashed_password, is_active, is_superuser, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&admin.id)
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&admin.hashed_password)
    .bind(admin.is_active)
    .bind(admin.is_superuser)
    .bind(admin.created_at.as_deref())
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error creating admin");
        ApiError::DatabaseError(e)
    })?;

    info!(
        created_by = %current.username,
        admin = %admin.username,
        email = %safe_email_log(&admin.email),
        "Admin account registered"
    );
    Ok(Json(admin.into()))
}

/// GET /api/auth/me
pub async fn me(AuthedAdmin(admin): AuthedAdmin) -> Json<AdminUserResponse> {
    Json(admin.into())
}

/// POST /api/auth/refresh
pub async fn refresh(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
) -> Result<Json<AdminTokenResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    Ok(Json(token_response(&state, admin)?))
}

/// GET /api/auth/health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "auth" }))
}
