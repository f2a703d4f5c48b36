// src/dsa/handlers/discussions.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::problems::published_problem;
use crate::auth::AuthedUser;
use crate::common::{generate_id, now_timestamp, ApiError, AppState, EntityPrefix};
use crate::dsa::models::*;

const REPLIES_PER_THREAD: i64 = 10;

/// GET /api/dsa/problems/:id/discussions
pub async fn list_discussions(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(problem_id): Path<String>,
    Query(params): Query<DiscussionQuery>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let threads = sqlx::query_as::<_, Discussion>(
        r#"SELECT * FROM dsa_discussions
           WHERE problem_id = ? AND parent_id IS NULL
           ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?"#,
    )
    .bind(&problem_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %problem_id, "Database error listing discussions");
        ApiError::DatabaseError(e)
    })?;

    let mut discussions = Vec::with_capacity(threads.len());
    for thread in threads {
        let replies = sqlx::query_as::<_, Discussion>(
            r#"SELECT * FROM dsa_discussions
               WHERE parent_id = ?
               ORDER BY created_at ASC, rowid ASC LIMIT ?"#,
        )
        .bind(&thread.id)
        .bind(REPLIES_PER_THREAD)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, discussion_id = %thread.id, "Database error listing replies");
            ApiError::DatabaseError(e)
        })?;

        discussions.push(DiscussionThread {
            discussion: thread.into(),
            replies: replies.into_iter().map(DiscussionResponse::from).collect(),
        });
    }

    Ok(Json(json!({ "discussions": discussions })))
}

/// POST /api/dsa/problems/:id/discussions
pub async fn create_discussion(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(problem_id): Path<String>,
    Json(body): Json<CreateDiscussion>,
) -> Result<Json<Value>, ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content is required".to_string()));
    }

    let state = state_lock.read().await.clone();
    published_problem(&state.db, &problem_id).await?;

    if let Some(parent_id) = &body.parent_id {
        let parent: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM dsa_discussions WHERE id = ? AND problem_id = ?",
        )
        .bind(parent_id)
        .bind(&problem_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
        if parent == 0 {
            return Err(ApiError::NotFound("Parent discussion not found".to_string()));
        }
    }

    let discussion_id = generate_id(EntityPrefix::Discussion);
    let user_name = user.email.split('@').next().unwrap_or_default().to_string();

    sqlx::query(
        r#"INSERT INTO dsa_discussions (
            id, problem_id, user_id, user_name, content, is_solution, parent_id, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&discussion_id)
    .bind(&problem_id)
    .bind(&user.id)
    .bind(&user_name)
    .bind(body.content.trim())
    .bind(body.is_solution as i64)
    .bind(body.parent_id.as_deref())
    .bind(now_timestamp())
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %problem_id, user_id = %user.id, "Database error creating discussion");
        ApiError::DatabaseError(e)
    })?;

    info!(discussion_id = %discussion_id, problem_id = %problem_id, "Discussion created");

    Ok(Json(json!({
        "message": "Discussion created successfully",
        "discussion_id": discussion_id,
    })))
}
