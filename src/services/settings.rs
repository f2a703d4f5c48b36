// src/services/settings.rs
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
struct CachedSetting {
    value: String,
    expires_at: DateTime<Utc>,
}

/// A stored setting as exposed to the admin settings page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

/// Runtime settings stored in `system_settings`, with an environment fallback.
///
/// A key such as `llm_model` falls back to the `LLM_MODEL` environment variable
/// when no row exists. Reads are cached for five minutes.
#[derive(Debug)]
pub struct SettingsService {
    db_pool: SqlitePool,
    cache: Arc<RwLock<HashMap<String, CachedSetting>>>,
    cache_ttl: Duration,
}

impl SettingsService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            db_pool,
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::minutes(5),
        }
    }

    /// Get a setting value by key
    /// Falls back to environment variable if not found in database
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>, SettingsError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(key) {
                if cached.expires_at > Utc::now() {
                    debug!(key = %key, "Setting retrieved from cache");
                    return Ok(Some(cached.value.clone()));
                }
            }
        }

        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM system_settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.db_pool)
                .await?;

        if let Some(value) = value {
            let mut cache = self.cache.write().await;
            cache.insert(
                key.to_string(),
                CachedSetting {
                    value: value.clone(),
                    expires_at: Utc::now() + self.cache_ttl,
                },
            );
            debug!(key = %key, "Setting retrieved from database");
            return Ok(Some(value));
        }

        if let Ok(env_value) = env::var(key.to_uppercase()) {
            debug!(key = %key, "Setting retrieved from environment variable");
            return Ok(Some(env_value));
        }

        debug!(key = %key, "Setting not found");
        Ok(None)
    }

    /// Like `get_setting`, but a missing key is an error
    pub async fn require_setting(&self, key: &str) -> Result<String, SettingsError> {
        self.get_setting(key)
            .await?
            .ok_or_else(|| SettingsError::NotFound(key.to_string()))
    }

    pub async fn set_setting(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
        updated_by: Option<&str>,
    ) -> Result<(), SettingsError> {
        sqlx::query(
            r#"
            INSERT INTO system_settings (key, value, description, updated_at, updated_by)
            VALUES (?, ?, ?, datetime('now'), ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                description = COALESCE(excluded.description, system_settings.description),
                updated_at = excluded.updated_at,
                updated_by = excluded.updated_by
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .bind(updated_by)
        .execute(&self.db_pool)
        .await?;

        self.invalidate_cache_key(key).await;

        info!(key = %key, "Setting updated successfully");
        Ok(())
    }

    pub async fn list_settings(&self) -> Result<Vec<SettingRecord>, SettingsError> {
        let rows = sqlx::query_as::<_, SettingRecord>(
            "SELECT key, value, description, updated_at, updated_by FROM system_settings ORDER BY key",
        )
        .fetch_all(&self.db_pool)
        .await?;

        debug!(count = rows.len(), "Retrieved all settings");
        Ok(rows)
    }

    pub async fn invalidate_cache_key(&self, key: &str) {
        let mut cache = self.cache.write().await;
        cache.remove(key);
        debug!(key = %key, "Cache entry invalidated");
    }

    pub async fn delete_setting(&self, key: &str) -> Result<bool, SettingsError> {
        let result = sqlx::query("DELETE FROM system_settings WHERE key = ?")
            .bind(key)
            .execute(&self.db_pool)
            .await?;

        self.invalidate_cache_key(key).await;

        info!(key = %key, "Setting deleted");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::migrations::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_set_and_get_setting() {
        let service = SettingsService::new(setup_test_db().await);

        service
            .set_setting("llm_model_test", "gpt-4o", Some("Model name"), Some("admin"))
            .await
            .unwrap();

        let value = service.get_setting("llm_model_test").await.unwrap();
        assert_eq!(value, Some("gpt-4o".to_string()));
    }

    #[tokio::test]
    async fn test_update_invalidates_cache() {
        let service = SettingsService::new(setup_test_db().await);

        service.set_setting("cached_key", "one", None, None).await.unwrap();
        assert_eq!(service.get_setting("cached_key").await.unwrap().as_deref(), Some("one"));

        service.set_setting("cached_key", "two", None, None).await.unwrap();
        assert_eq!(service.get_setting("cached_key").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let service = SettingsService::new(setup_test_db().await);

        service.set_setting("key1", "value1", None, Some("admin")).await.unwrap();
        service.set_setting("key2", "value2", None, Some("admin")).await.unwrap();
        assert_eq!(service.list_settings().await.unwrap().len(), 2);

        assert!(service.delete_setting("key1").await.unwrap());
        assert!(!service.delete_setting("key1").await.unwrap());
        assert!(service.require_setting("key1_missing_everywhere").await.is_err());
    }
}
