// Application state shared across all modules

use sqlx::SqlitePool;
use std::env;
use std::sync::Arc;

use crate::common::dev_mode::DevModeConfig;
use crate::services::{ExpirationService, GoogleService, LlmService, RateLimitService, SettingsService};

/// Token lifetimes and signing secret
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_token_expire_minutes: i64,
    pub user_token_expire_days: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "replace_with_strong_secret".to_string()),
            admin_token_expire_minutes: env::var("ADMIN_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1440),
            user_token_expire_days: env::var("USER_TOKEN_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        }
    }
}

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub auth: AuthConfig,
    pub share_base_url: String,
    pub dev_mode: DevModeConfig,
    pub settings_service: Arc<SettingsService>,
    pub llm_service: Arc<LlmService>,
    pub google_service: Arc<GoogleService>,
    pub rate_limit_service: Arc<RateLimitService>,
    pub expiration_service: Arc<ExpirationService>,
}
