// src/interactions/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::models::*;
use crate::auth::AuthedUser;
use crate::common::query::increment_counter;
use crate::common::{generate_id, now_timestamp, ApiError, AppState, EntityPrefix};

fn db_error(e: sqlx::Error) -> ApiError {
    error!(error = %e, "Database error handling interaction");
    ApiError::DatabaseError(e)
}

async fn ensure_content_exists(
    pool: &SqlitePool,
    kind: ContentKind,
    content_id: &str,
) -> Result<(), ApiError> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", kind.table());
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(content_id)
        .fetch_one(pool)
        .await
        .map_err(db_error)?;
    if count == 0 {
        return Err(ApiError::NotFound("Content not found".to_string()));
    }
    Ok(())
}

async fn has_interaction(
    pool: &SqlitePool,
    user_id: &str,
    kind: ContentKind,
    content_id: &str,
    interaction: InteractionKind,
) -> Result<bool, ApiError> {
    let count: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM interactions
           WHERE user_id = ? AND content_type = ? AND content_id = ? AND kind = ?"#,
    )
    .bind(user_id)
    .bind(kind.as_str())
    .bind(content_id)
    .bind(interaction.as_str())
    .fetch_one(pool)
    .await
    .map_err(db_error)?;
    Ok(count > 0)
}

/// Inserts the interaction unless it already exists; true when a row was added
async fn add_interaction(
    pool: &SqlitePool,
    user_id: &str,
    kind: ContentKind,
    content_id: &str,
    interaction: InteractionKind,
) -> Result<bool, ApiError> {
    let result = sqlx::query(
        r#"INSERT OR IGNORE INTO interactions (id, user_id, content_type, content_id, kind, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(generate_id(EntityPrefix::Interaction))
    .bind(user_id)
    .bind(kind.as_str())
    .bind(content_id)
    .bind(interaction.as_str())
    .bind(now_timestamp())
    .execute(pool)
    .await
    .map_err(db_error)?;
    Ok(result.rows_affected() > 0)
}

async fn remove_interaction(
    pool: &SqlitePool,
    user_id: &str,
    kind: ContentKind,
    content_id: &str,
    interaction: InteractionKind,
) -> Result<bool, ApiError> {
    let result = sqlx::query(
        r#"DELETE FROM interactions
           WHERE user_id = ? AND content_type = ? AND content_id = ? AND kind = ?"#,
    )
    .bind(user_id)
    .bind(kind.as_str())
    .bind(content_id)
    .bind(interaction.as_str())
    .execute(pool)
    .await
    .map_err(db_error)?;
    Ok(result.rows_affected() > 0)
}

async fn count_likes(pool: &SqlitePool, kind: ContentKind, content_id: &str) -> Result<i64, ApiError> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM interactions WHERE content_type = ? AND content_id = ? AND kind = 'like'",
    )
    .bind(kind.as_str())
    .bind(content_id)
    .fetch_one(pool)
    .await
    .map_err(db_error)
}

/// POST /api/interactions/:content_type/:content_id/like - toggles
pub async fn toggle_like(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path((content_type, content_id)): Path<(String, String)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let kind = ContentKind::parse(&content_type)?;
    let state = state_lock.read().await.clone();
    ensure_content_exists(&state.db, kind, &content_id).await?;

    let removed = remove_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Like).await?;
    let liked = if removed {
        false
    } else {
        add_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Like).await?
    };

    let total_likes = count_likes(&state.db, kind, &content_id).await?;

    if kind == ContentKind::Article {
        sqlx::query("UPDATE articles SET likes = ? WHERE id = ?")
            .bind(total_likes)
            .bind(&content_id)
            .execute(&state.db)
            .await
            .map_err(db_error)?;
    }

    info!(user_id = %user.id, content_type = kind.as_str(), content_id = %content_id, liked, "Like toggled");
    Ok(Json(LikeResponse { liked, total_likes }))
}

/// POST /api/interactions/:content_type/:content_id/save - toggles
pub async fn toggle_save(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path((content_type, content_id)): Path<(String, String)>,
) -> Result<Json<SaveResponse>, ApiError> {
    let kind = ContentKind::parse(&content_type)?;
    let state = state_lock.read().await.clone();
    ensure_content_exists(&state.db, kind, &content_id).await?;

    let removed = remove_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Save).await?;
    let response = if removed {
        SaveResponse {
            saved: false,
            message: "Removed from saved items".to_string(),
        }
    } else {
        add_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Save).await?;
        SaveResponse {
            saved: true,
            message: "Added to saved items".to_string(),
        }
    };

    Ok(Json(response))
}

/// POST /api/interactions/:content_type/:content_id/share
pub async fn share_content(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path((content_type, content_id)): Path<(String, String)>,
    Query(params): Query<ShareQuery>,
) -> Result<Json<ShareResponse>, ApiError> {
    let kind = ContentKind::parse(&content_type)?;
    let state = state_lock.read().await.clone();

    let share_url = format!(
        "{}/{}",
        state.share_base_url.trim_end_matches('/'),
        kind.share_path(&content_id)
    );
    add_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Share).await?;

    info!(
        user_id = %user.id,
        content_type = kind.as_str(),
        content_id = %content_id,
        platform = params.platform.as_deref().unwrap_or("link"),
        "Content shared"
    );
    Ok(Json(ShareResponse {
        share_url,
        message: "Content shared successfully".to_string(),
    }))
}

/// POST /api/interactions/:content_type/:content_id/apply - jobs and internships only
pub async fn apply_to_position(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path((content_type, content_id)): Path<(String, String)>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let kind = ContentKind::parse(&content_type)?;
    if !kind.accepts_applications() {
        return Err(ApiError::BadRequest(
            "Apply action only available for jobs and internships".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();
    ensure_content_exists(&state.db, kind, &content_id).await?;

    if !add_interaction(&state.db, &user.id, kind, &content_id, InteractionKind::Apply).await? {
        return Ok(Json(ApplyResponse {
            applied: true,
            message: "You have already applied to this position".to_string(),
        }));
    }

    let table = if kind == ContentKind::Job { "jobs" } else { "internships" };
    increment_counter(&state.db, table, "applications", &[content_id.clone()])
        .await
        .map_err(db_error)?;

    info!(user_id = %user.id, content_type = kind.as_str(), content_id = %content_id, "Application recorded");
    Ok(Json(ApplyResponse {
        applied: true,
        message: "Application recorded successfully".to_string(),
    }))
}

/// GET /api/interactions/saved
pub async fn get_saved_items(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Query(params): Query<SavedQuery>,
) -> Result<Json<Value>, ApiError> {
    let kind = params.content_type.as_deref().map(ContentKind::parse).transpose()?;
    let state = state_lock.read().await.clone();

    let mut items = sqlx::query_as::<_, SavedItem>(
        r#"SELECT content_type, content_id, created_at AS saved_at, NULL AS title
           FROM interactions
           WHERE user_id = ? AND kind = 'save' AND (? IS NULL OR content_type = ?)
           ORDER BY created_at DESC, rowid DESC LIMIT 100"#,
    )
    .bind(&user.id)
    .bind(kind.map(|k| k.as_str()))
    .bind(kind.map(|k| k.as_str()))
    .fetch_all(&state.db)
    .await
    .map_err(db_error)?;

    for item in items.iter_mut() {
        let Ok(kind) = ContentKind::parse(&item.content_type) else {
            continue;
        };
        let sql = format!("SELECT title FROM {} WHERE id = ?", kind.table());
        item.title = sqlx::query_scalar(&sql)
            .bind(&item.content_id)
            .fetch_optional(&state.db)
            .await
            .map_err(db_error)?;
    }

    Ok(Json(json!({ "saved_items": items })))
}

/// GET /api/interactions/:content_type/:content_id/status
pub async fn get_interaction_status(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path((content_type, content_id)): Path<(String, String)>,
) -> Result<Json<InteractionStatus>, ApiError> {
    let kind = ContentKind::parse(&content_type)?;
    let state = state_lock.read().await.clone();
    let db = &state.db;

    Ok(Json(InteractionStatus {
        liked: has_interaction(db, &user.id, kind, &content_id, InteractionKind::Like).await?,
        saved: has_interaction(db, &user.id, kind, &content_id, InteractionKind::Save).await?,
        applied: has_interaction(db, &user.id, kind, &content_id, InteractionKind::Apply).await?,
        shared: has_interaction(db, &user.id, kind, &content_id, InteractionKind::Share).await?,
        total_likes: count_likes(db, kind, &content_id).await?,
    }))
}
