//! JWT issuing and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::Claims;
use crate::common::helpers::safe_token_log;
use crate::common::{ApiError, AuthConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Admin,
    User,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Admin => "admin",
            TokenKind::User => "user",
        }
    }
}

fn sign(config: &AuthConfig, sub: &str, kind: TokenKind, lifetime: Duration) -> Result<String, ApiError> {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (Utc::now() + lifetime).timestamp() as usize,
        token_type: kind.as_str().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, token_type = kind.as_str(), "JWT encoding error");
        ApiError::InternalServer("jwt error".to_string())
    })
}

/// Admin token; `sub` is the admin username
pub fn create_admin_token(config: &AuthConfig, username: &str) -> Result<String, ApiError> {
    sign(
        config,
        username,
        TokenKind::Admin,
        Duration::minutes(config.admin_token_expire_minutes),
    )
}

/// User token; `sub` is the user id
pub fn create_user_token(config: &AuthConfig, user_id: &str) -> Result<String, ApiError> {
    sign(
        config,
        user_id,
        TokenKind::User,
        Duration::days(config.user_token_expire_days),
    )
}

/// `<type>:<sub>` of a token that passes signature and expiry checks, of either kind.
/// Failures are not logged; callers use this to key anonymous traffic.
pub fn verified_subject(config: &AuthConfig, token: &str) -> Option<String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()
    .map(|data| format!("{}:{}", data.claims.token_type, data.claims.sub))
}

/// Verifies signature and expiry, then checks the token is of the expected kind
pub fn decode_token(config: &AuthConfig, token: &str, kind: TokenKind) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        warn!(error = %e, token = %safe_token_log(token), "JWT token validation failed");
        ApiError::Unauthorized("Could not validate credentials".to_string())
    })?;

    if data.claims.token_type != kind.as_str() {
        warn!(
            expected = kind.as_str(),
            actual = %data.claims.token_type,
            "JWT token has the wrong type"
        );
        return Err(ApiError::Unauthorized("Invalid token type".to_string()));
    }

    Ok(data.claims)
}
