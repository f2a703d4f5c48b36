//! Admin password hashing and the default admin account

use sqlx::SqlitePool;
use std::env;
use tracing::{error, info};

use crate::common::{generate_id, now_timestamp, ApiError, EntityPrefix};

// Cheap cost keeps the test suite fast; production uses bcrypt's default.
#[cfg(test)]
const BCRYPT_COST: u32 = 4;
#[cfg(not(test))]
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ApiError::InternalServer("Password hashing failed".to_string())
    })
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl DefaultAdmin {
    pub fn from_env() -> Self {
        Self {
            username: env::var("DEFAULT_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            email: env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@talentd.local".to_string()),
            password: env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}

/// Creates a superuser when the admin table is empty. Returns whether one was created.
pub async fn ensure_default_admin(pool: &SqlitePool, admin: &DefaultAdmin) -> Result<bool, ApiError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    if count > 0 {
        return Ok(false);
    }

    let hashed = hash_password(&admin.password)?;
    sqlx::query(
        "INSERT INTO admin_users (id, username, email, hashed_password, is_active, is_superuser, created_at) \
         VALUES (?, ?, ?, ?, 1, 1, ?)",
    )
    .bind(generate_id(EntityPrefix::Admin))
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&hashed)
    .bind(now_timestamp())
    .execute(pool)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(username = %admin.username, "Default admin user created");
    Ok(true)
}
