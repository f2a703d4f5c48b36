// src/admin/handlers/settings.rs

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::admin::models::{TestConnectionRequest, UpdateSettingsRequest};
use crate::auth::AuthedAdmin;
use crate::common::{ApiError, AppState};
use crate::services::settings::SettingRecord;

/// Keys whose values are never returned in full
fn is_secret_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.ends_with("api_key") || key.ends_with("secret") || key.contains("password")
}

pub(crate) fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("********{}", tail)
}

/// GET /api/admin/settings
pub async fn get_system_settings(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
) -> Result<Json<Vec<SettingRecord>>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut settings = state.settings_service.list_settings().await.map_err(|e| {
        error!(error = %e, "Error fetching system settings");
        ApiError::InternalServer(format!("Failed to fetch settings: {}", e))
    })?;

    for setting in settings.iter_mut() {
        if is_secret_key(&setting.key) {
            setting.value = mask_value(&setting.value);
        }
    }

    info!(admin = %admin.username, settings_count = settings.len(), "System settings fetched");
    Ok(Json(settings))
}

/// PUT /api/admin/settings - superuser only
pub async fn update_system_settings(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<Value>, ApiError> {
    if admin.is_superuser == 0 {
        warn!(admin = %admin.username, "Settings update denied: superuser required");
        return Err(ApiError::Forbidden("Not enough permissions".to_string()));
    }

    let state = state_lock.read().await.clone();
    let mut updated = Vec::with_capacity(request.settings.len());

    for (key, update) in &request.settings {
        if key.trim().is_empty() {
            return Err(ApiError::BadRequest("Setting key cannot be empty".to_string()));
        }
        state
            .settings_service
            .set_setting(key, &update.value, update.description.as_deref(), Some(&admin.username))
            .await
            .map_err(|e| {
                error!(error = %e, key = %key, "Error updating setting");
                ApiError::InternalServer(format!("Failed to update setting {}: {}", key, e))
            })?;
        updated.push(key.clone());
    }

    updated.sort();
    info!(admin = %admin.username, count = updated.len(), "System settings updated");
    Ok(Json(json!({
        "message": "Settings updated successfully",
        "updated": updated,
    })))
}

/// DELETE /api/admin/settings/:key - falls back to the environment afterwards
pub async fn delete_system_setting(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if admin.is_superuser == 0 {
        return Err(ApiError::Forbidden("Not enough permissions".to_string()));
    }

    let state = state_lock.read().await.clone();
    let deleted = state.settings_service.delete_setting(&key).await.map_err(|e| {
        error!(error = %e, key = %key, "Error deleting setting");
        ApiError::InternalServer(format!("Failed to delete setting: {}", e))
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Setting not found".to_string()));
    }
    Ok(Json(json!({ "message": "Setting deleted successfully" })))
}

/// POST /api/admin/settings/test-connection
pub async fn test_service_connection(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(request): Json<TestConnectionRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = match request.service.as_str() {
        "llm" => match state.llm_service.get_config().await {
            Ok(config) => json!({
                "success": true,
                "message": format!("LLM configured with model {}", config.model),
                "service": "llm"
            }),
            Err(e) => json!({
                "success": false,
                "message": e.to_string(),
                "service": "llm"
            }),
        },
        "google" => match state.google_service.get_config().await {
            Ok(_) => json!({
                "success": true,
                "message": "Google OAuth configured",
                "service": "google"
            }),
            Err(e) => json!({
                "success": false,
                "message": e.to_string(),
                "service": "google"
            }),
        },
        other => {
            return Err(ApiError::BadRequest(format!("Unknown service: {}", other)));
        }
    };

    info!(admin = %admin.username, service = %request.service, "Connection test completed");
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_values_are_masked() {
        assert!(is_secret_key("llm_api_key"));
        assert!(is_secret_key("GOOGLE_CLIENT_SECRET"));
        assert!(!is_secret_key("llm_model"));
        assert_eq!(mask_value("sk-1234567890abcd"), "********abcd");
        assert_eq!(mask_value("short"), "********");
    }
}
