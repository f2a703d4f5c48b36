//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::{AdminUser, User};
use super::tokens::{decode_token, TokenKind};
use crate::common::{safe_email_log, ApiError, AppState};

/// Admin token required
#[derive(Debug)]
pub struct AuthedAdmin(pub AdminUser);

/// User token required
#[derive(Debug)]
pub struct AuthedUser(pub User);

/// User token optional; invalid or missing tokens yield `None`
#[derive(Debug)]
pub struct MaybeUser(pub Option<User>);

async fn app_state<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<AppState, ApiError> {
    let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
        Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;
    let app_state = state_lock.read().await.clone();
    Ok(app_state)
}

/// Handles "Bearer <token>" or a raw token
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

async fn load_user(app_state: &AppState, token: &str) -> Result<User, ApiError> {
    let claims = decode_token(&app_state.auth, token, TokenKind::User)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&claims.sub)
        .fetch_optional(&app_state.db)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %claims.sub, "Database error during user lookup in authentication");
            ApiError::DatabaseError(e)
        })?;

    match user {
        Some(u) => {
            debug!(user_id = %u.id, email = %safe_email_log(&u.email), "User authenticated");
            Ok(u)
        }
        None => {
            warn!(user_id = %claims.sub, "Authentication failed: user not found in database");
            Err(ApiError::Unauthorized("User not found".into()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        // DEV MODE: bypass only when the dev identity is an admin
        if app_state.dev_mode.is_enabled() && app_state.dev_mode.user_is_admin {
            debug!("DEV MODE: admin authentication bypassed");
            return Ok(AuthedAdmin(app_state.dev_mode.create_dev_admin()));
        }

        let token = bearer_token(parts).ok_or_else(|| {
            warn!("Admin authentication failed: missing Authorization header");
            ApiError::Unauthorized("Not authenticated".into())
        })?;

        let claims = decode_token(&app_state.auth, &token, TokenKind::Admin)?;

        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE username = ? AND is_active = 1",
        )
        .bind(&claims.sub)
        .fetch_optional(&app_state.db)
        .await
        .map_err(|e| {
            error!(error = %e, username = %claims.sub, "Database error during admin lookup");
            ApiError::DatabaseError(e)
        })?;

        match admin {
            Some(a) => {
                debug!(admin = %a.username, "Admin authenticated");
                Ok(AuthedAdmin(a))
            }
            None => {
                warn!(username = %claims.sub, "Admin authentication failed: unknown or inactive admin");
                Err(ApiError::Unauthorized("Could not validate credentials".into()))
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        if app_state.dev_mode.is_enabled() {
            let dev_user = app_state.dev_mode.create_dev_user();
            debug!(user_id = %dev_user.id, "DEV MODE: user authentication bypassed");
            return Ok(AuthedUser(dev_user));
        }

        let token = bearer_token(parts).ok_or_else(|| {
            warn!("User authentication failed: missing Authorization header");
            ApiError::Unauthorized("Not authenticated".into())
        })?;

        load_user(&app_state, &token).await.map(AuthedUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        if app_state.dev_mode.is_enabled() {
            return Ok(MaybeUser(Some(app_state.dev_mode.create_dev_user())));
        }

        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };

        match load_user(&app_state, &token).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(ApiError::DatabaseError(e)) => Err(ApiError::DatabaseError(e)),
            Err(_) => Ok(MaybeUser(None)),
        }
    }
}
