//! Site user sign-in through a Google profile

use axum::extract::{Extension, Json};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::auth::extractors::AuthedUser;
use crate::auth::models::{GoogleLoginRequest, User, UserTokenResponse};
use crate::auth::tokens::create_user_token;
use crate::common::{
    generate_user_id, now_timestamp, safe_email_log, ApiError, AppState, ValidationResult,
};

/// Profile fields taken from Google
pub struct GoogleProfile<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub google_id: &'a str,
    pub picture: Option<&'a str>,
}

/// Creates the user or refreshes an existing one matched by email or google id
pub async fn upsert_google_user(pool: &SqlitePool, profile: GoogleProfile<'_>) -> Result<User, ApiError> {
    let email = profile.email.trim().to_lowercase();
    let now = now_timestamp();

    let existing: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? OR google_id = ? LIMIT 1")
            .bind(&email)
            .bind(profile.google_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error checking existing user during sign-in");
                ApiError::DatabaseError(e)
            })?;

    let user_id = match existing {
        Some(user) => {
            sqlx::query(
                "UPDATE users SET name = COALESCE(?, name), google_id = ?, picture = COALESCE(?, picture), \
                 last_login = ? WHERE id = ?",
            )
            .bind(profile.name)
            .bind(profile.google_id)
            .bind(profile.picture)
            .bind(&now)
            .bind(&user.id)
            .execute(pool)
            .await
            .map_err(ApiError::DatabaseError)?;
            user.id
        }
        None => {
            let id = generate_user_id();
            info!(user_id = %id, email = %safe_email_log(&email), "Creating new user account via Google");
            sqlx::query(
                "INSERT INTO users (id, email, name, google_id, picture, created_at, last_login) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&email)
            .bind(profile.name)
            .bind(profile.google_id)
            .bind(profile.picture)
            .bind(&now)
            .bind(&now)
            .execute(pool)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %id, "Database error inserting new user");
                ApiError::DatabaseError(e)
            })?;
            id
        }
    };

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_one(pool)
        .await
        .map_err(ApiError::DatabaseError)
}

pub fn user_token_response(state: &AppState, user: User) -> Result<UserTokenResponse, ApiError> {
    let access_token = create_user_token(&state.auth, &user.id)?;
    Ok(UserTokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user,
    })
}

/// POST /api/user-auth/google-login
pub async fn google_login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<Json<UserTokenResponse>, ApiError> {
    let email = payload.email.as_deref().unwrap_or("");
    let name = payload.name.as_deref().unwrap_or("");
    let google_id = payload.google_id.as_deref().unwrap_or("");

    let mut validation = ValidationResult::new();
    validation.require_text("email", "Email", email, 254);
    validation.require_text("name", "Name", name, 200);
    validation.require_text("google_id", "Google ID", google_id, 200);
    if !validation.is_valid {
        return Err(ApiError::BadRequest(
            "Email, name, and google_id are required".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();
    let user = upsert_google_user(
        &state.db,
        GoogleProfile {
            email,
            name: Some(name),
            google_id,
            picture: payload.picture.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user.id, email = %safe_email_log(&user.email), "User signed in");
    Ok(Json(user_token_response(&state, user)?))
}

/// GET /api/user-auth/me
pub async fn me(AuthedUser(user): AuthedUser) -> Json<User> {
    Json(user)
}

/// POST /api/user-auth/refresh
pub async fn refresh(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
) -> Result<Json<UserTokenResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    Ok(Json(user_token_response(&state, user)?))
}

/// POST /api/user-auth/logout
/// Tokens are stateless, so logout only confirms; the client drops its token
pub async fn logout(AuthedUser(user): AuthedUser) -> Json<serde_json::Value> {
    info!(user_id = %user.id, "User logout");
    Json(json!({ "message": "Successfully logged out" }))
}
