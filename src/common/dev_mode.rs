// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing authentication for local testing

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

use crate::auth::models::{AdminUser, User};
use crate::common::helpers::now_timestamp;

/// Fixed ids so dev-mode requests always resolve to the same rows
pub const DEV_USER_ID: &str = "U_DEV000";
pub const DEV_ADMIN_ID: &str = "AD_DEV000";

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub user_email: String,
    pub user_name: String,
    pub user_is_admin: bool,
}

impl Default for DevModeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            user_email: "dev@talentd.local".to_string(),
            user_name: "Dev User".to_string(),
            user_is_admin: false,
        }
    }
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let flag = |key: &str| {
            env::var(key)
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false)
        };

        Self {
            enabled: flag("DEV_MODE"),
            user_email: env::var("DEV_USER_EMAIL").unwrap_or(defaults.user_email),
            user_name: env::var("DEV_USER_NAME").unwrap_or(defaults.user_name),
            user_is_admin: flag("DEV_ADMIN"),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn create_dev_user(&self) -> User {
        User {
            id: DEV_USER_ID.to_string(),
            email: self.user_email.clone(),
            name: Some(self.user_name.clone()),
            google_id: None,
            picture: None,
            created_at: Some(now_timestamp()),
            last_login: None,
        }
    }

    pub fn create_dev_admin(&self) -> AdminUser {
        AdminUser {
            id: DEV_ADMIN_ID.to_string(),
            username: "dev-admin".to_string(),
            email: self.user_email.clone(),
            hashed_password: String::new(),
            is_active: 1,
            is_superuser: 1,
            created_at: Some(now_timestamp()),
            last_login: None,
        }
    }
}

/// Inserts the dev user row so user-scoped queries resolve in dev mode
pub async fn ensure_dev_user(pool: &SqlitePool, config: &DevModeConfig) -> Result<(), sqlx::Error> {
    if !config.enabled {
        return Ok(());
    }
    let user = config.create_dev_user();
    sqlx::query("INSERT OR IGNORE INTO users (id, email, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(&user.id)
        .bind(&user.email)
        .bind(user.name.as_deref())
        .bind(user.created_at.as_deref())
        .execute(pool)
        .await?;
    Ok(())
}

/// Log dev mode status on startup
pub fn log_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        warn!(
            user = %config.user_name,
            admin = config.user_is_admin,
            "DEV MODE ENABLED: authentication bypassed, do not use in production"
        );
    } else {
        info!("Production mode: authentication required");
    }
}

/// CLI argument parsing for dev mode
fn parse_dev_mode_args<I: IntoIterator<Item = String>>(args: I) -> Option<bool> {
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => return Some(true),
            "--no-dev" | "--prod" | "--production" => return Some(false),
            _ => {}
        }
    }
    None
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        info!(dev_mode = cli_dev_mode, "CLI override for DEV_MODE");
        config.enabled = cli_dev_mode;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_disabled_by_default() {
        assert!(!DevModeConfig::default().is_enabled());
    }

    #[test]
    fn test_cli_flags() {
        let args = |a: &[&str]| a.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(parse_dev_mode_args(args(&["api", "--dev"])), Some(true));
        assert_eq!(parse_dev_mode_args(args(&["api", "--prod"])), Some(false));
        assert_eq!(parse_dev_mode_args(args(&["api"])), None);
    }

    #[test]
    fn test_dev_identities_are_stable() {
        let config = DevModeConfig {
            enabled: true,
            ..DevModeConfig::default()
        };
        assert_eq!(config.create_dev_user().id, DEV_USER_ID);
        assert_eq!(config.create_dev_admin().is_superuser, 1);
    }
}
