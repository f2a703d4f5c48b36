// src/services/google.rs
use crate::services::settings::{SettingsError, SettingsService};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google OAuth not configured")]
    NotConfigured,

    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("Invalid ID token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Settings error: {0}")]
    SettingsError(#[from] SettingsError),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub id_token: Option<String>,
    pub scope: Option<String>,
}

/// Profile returned by the userinfo endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    #[serde(default)]
    pub verified_email: bool,
}

/// Claims read back from the tokeninfo endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenInfo {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub aud: Option<String>,
    pub exp: Option<String>,
}

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const TOKENINFO_ENDPOINT: &str = "https://oauth2.googleapis.com/tokeninfo";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone)]
pub struct GoogleService {
    settings_service: Arc<SettingsService>,
    client: Client,
}

impl GoogleService {
    pub fn new(settings_service: Arc<SettingsService>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            settings_service,
            client,
        }
    }

    /// OAuth client settings; `google_*` settings fall back to `GOOGLE_*` env vars
    pub async fn get_config(&self) -> Result<GoogleOAuthConfig, GoogleError> {
        let client_id = self
            .settings_service
            .get_setting("google_client_id")
            .await?
            .filter(|v| !v.is_empty())
            .ok_or(GoogleError::NotConfigured)?;
        let client_secret = self.settings_service.get_setting("google_client_secret").await?;
        let redirect_uri = self
            .settings_service
            .get_setting("google_redirect_uri")
            .await?
            .unwrap_or_else(|| "http://localhost:3000/auth/google/callback".to_string());

        Ok(GoogleOAuthConfig {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    pub async fn get_authorization_url(&self) -> Result<String, GoogleError> {
        let config = self.get_config().await?;
        let scope_param = ["openid", "email", "profile"].join(" ");

        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            AUTH_ENDPOINT,
            urlencoding::encode(&config.client_id),
            urlencoding::encode(&config.redirect_uri),
            urlencoding::encode(&scope_param)
        );

        debug!("Generated Google OAuth authorization URL");
        Ok(auth_url)
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, GoogleError> {
        let config = self.get_config().await?;
        let client_secret = config.client_secret.ok_or(GoogleError::NotConfigured)?;

        let params = [
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(GoogleError::OAuthFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let token_response = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))?;

        info!("Successfully exchanged authorization code for tokens");
        Ok(token_response)
    }

    pub async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, GoogleError> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Google userinfo request rejected");
            return Err(GoogleError::InvalidToken(
                "Failed to get user info".to_string(),
            ));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))
    }

    /// Validates an ID token with Google's tokeninfo endpoint
    pub async fn verify_id_token(&self, id_token: &str) -> Result<IdTokenInfo, GoogleError> {
        let config = self.get_config().await?;

        let response = self
            .client
            .get(TOKENINFO_ENDPOINT)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Google tokeninfo rejected the ID token");
            return Err(GoogleError::InvalidToken(
                "invalid or malformed id_token".to_string(),
            ));
        }

        let info = response
            .json::<IdTokenInfo>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))?;

        check_id_token(&info, &config.client_id, Utc::now().timestamp())?;
        Ok(info)
    }
}

/// Audience must equal our client id and `exp` must lie in the future
fn check_id_token(info: &IdTokenInfo, client_id: &str, now: i64) -> Result<(), GoogleError> {
    match info.aud.as_deref() {
        Some(aud) if aud == client_id => {}
        Some(aud) => {
            warn!(token_audience = %aud, "Google token audience mismatch");
            return Err(GoogleError::InvalidToken("token audience mismatch".to_string()));
        }
        None => {
            return Err(GoogleError::InvalidToken("token missing audience".to_string()));
        }
    }

    if let Some(exp) = info.exp.as_deref().and_then(|e| e.parse::<i64>().ok()) {
        if exp < now {
            return Err(GoogleError::TokenExpired);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::migrations::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_settings() -> Arc<SettingsService> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        Arc::new(SettingsService::new(pool))
    }

    fn token_info(aud: Option<&str>, exp: Option<&str>) -> IdTokenInfo {
        IdTokenInfo {
            sub: "1234".to_string(),
            email: Some("dev@example.com".to_string()),
            name: None,
            picture: None,
            aud: aud.map(str::to_string),
            exp: exp.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_authorization_url() {
        let settings_service = setup_settings().await;
        settings_service
            .set_setting("google_client_id", "test_client_id", None, Some("admin"))
            .await
            .unwrap();
        settings_service
            .set_setting("google_redirect_uri", "http://localhost:3000/callback", None, None)
            .await
            .unwrap();

        let google_service = GoogleService::new(settings_service);
        let auth_url = google_service.get_authorization_url().await.unwrap();

        assert!(auth_url.starts_with(AUTH_ENDPOINT));
        assert!(auth_url.contains("client_id=test_client_id"));
        assert!(auth_url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"));
        assert!(auth_url.contains("scope=openid%20email%20profile"));
    }

    #[tokio::test]
    async fn test_blank_client_id_is_not_configured() {
        let settings_service = setup_settings().await;
        settings_service
            .set_setting("google_client_id", "", None, None)
            .await
            .unwrap();

        let google_service = GoogleService::new(settings_service);
        assert!(matches!(
            google_service.get_config().await,
            Err(GoogleError::NotConfigured)
        ));
    }

    #[test]
    fn test_check_id_token() {
        assert!(check_id_token(&token_info(Some("client"), Some("2000")), "client", 1000).is_ok());
        assert!(matches!(
            check_id_token(&token_info(Some("other"), Some("2000")), "client", 1000),
            Err(GoogleError::InvalidToken(_))
        ));
        assert!(matches!(
            check_id_token(&token_info(None, None), "client", 1000),
            Err(GoogleError::InvalidToken(_))
        ));
        assert!(matches!(
            check_id_token(&token_info(Some("client"), Some("500")), "client", 1000),
            Err(GoogleError::TokenExpired)
        ));
    }
}
