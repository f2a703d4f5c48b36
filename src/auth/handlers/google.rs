//! Server-side Google OAuth flow

use axum::extract::{Extension, Json, Query};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::user::{upsert_google_user, user_token_response, GoogleProfile};
use crate::auth::models::{
    GoogleCallbackQuery, GoogleIdTokenPayload, UserInfoQuery, UserTokenResponse,
};
use crate::common::{safe_email_log, ApiError, AppState};
use crate::services::google::{GoogleError, GoogleUserInfo};

fn google_error(e: GoogleError) -> ApiError {
    match e {
        GoogleError::NotConfigured => {
            ApiError::ServiceUnavailable("Google OAuth is not configured".to_string())
        }
        GoogleError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        GoogleError::TokenExpired => ApiError::Unauthorized("token has expired".to_string()),
        GoogleError::OAuthFailed(msg) => {
            ApiError::BadRequest(format!("Failed to exchange code: {}", msg))
        }
        other => {
            error!(error = %other, "Google OAuth request failed");
            ApiError::InternalServer("Google authentication failed".to_string())
        }
    }
}

/// GET /api/auth/google/login
pub async fn login_url(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let authorization_url = state
        .google_service
        .get_authorization_url()
        .await
        .map_err(google_error)?;

    Ok(Json(json!({ "authorization_url": authorization_url })))
}

/// GET /api/auth/google/callback
pub async fn callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<GoogleCallbackQuery>,
) -> Result<Json<UserTokenResponse>, ApiError> {
    if let Some(oauth_error) = params.error {
        warn!(oauth_error = %oauth_error, "Google OAuth returned error");
        return Err(ApiError::BadRequest(format!("OAuth error: {}", oauth_error)));
    }
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No authorization code provided".to_string()))?;

    let state = state_lock.read().await.clone();
    let tokens = state
        .google_service
        .exchange_code(&code)
        .await
        .map_err(google_error)?;
    let info = state
        .google_service
        .get_user_info(&tokens.access_token)
        .await
        .map_err(google_error)?;

    let user = upsert_google_user(
        &state.db,
        GoogleProfile {
            email: &info.email,
            name: info.name.as_deref(),
            google_id: &info.id,
            picture: info.picture.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user.id, email = %safe_email_log(&user.email), "User signed in via OAuth callback");
    Ok(Json(user_token_response(&state, user)?))
}

/// POST /api/auth/google/verify-token
pub async fn verify_token(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleIdTokenPayload>,
) -> Result<Json<UserTokenResponse>, ApiError> {
    if payload.id_token.trim().is_empty() {
        return Err(ApiError::BadRequest("id_token is required".to_string()));
    }

    let state = state_lock.read().await.clone();
    let token_info = state
        .google_service
        .verify_id_token(&payload.id_token)
        .await
        .map_err(google_error)?;

    let email = token_info
        .email
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("token missing required fields".to_string()))?;

    let user = upsert_google_user(
        &state.db,
        GoogleProfile {
            email,
            name: token_info.name.as_deref(),
            google_id: &token_info.sub,
            picture: token_info.picture.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user.id, "User signed in via Google ID token");
    Ok(Json(user_token_response(&state, user)?))
}

/// GET /api/auth/google/user-info
pub async fn user_info(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<UserInfoQuery>,
) -> Result<Json<GoogleUserInfo>, ApiError> {
    let state = state_lock.read().await.clone();
    let info = state
        .google_service
        .get_user_info(&params.access_token)
        .await
        .map_err(google_error)?;
    Ok(Json(info))
}

/// POST /api/auth/google/logout
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "message": "Successfully logged out" }))
}
