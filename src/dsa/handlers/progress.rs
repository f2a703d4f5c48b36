// src/dsa/handlers/progress.rs

use axum::{extract::Extension, response::Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use crate::dsa::models::*;

/// GET /api/dsa/progress
pub async fn get_progress(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
) -> Result<Json<ProgressSummary>, ApiError> {
    let state = state_lock.read().await.clone();

    let totals: Vec<(String, i64)> = sqlx::query_as(
        "SELECT difficulty, COUNT(*) FROM dsa_problems WHERE status = 'published' GROUP BY difficulty",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error counting problems by difficulty");
        ApiError::DatabaseError(e)
    })?;

    let solved: Vec<(String, i64)> = sqlx::query_as(
        r#"SELECT p.difficulty, COUNT(*)
           FROM dsa_user_progress up
           JOIN dsa_problems p ON p.id = up.problem_id
           WHERE up.user_id = ? AND up.status = 'solved'
           GROUP BY p.difficulty"#,
    )
    .bind(&user.id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user.id, "Database error counting solved problems");
        ApiError::DatabaseError(e)
    })?;

    let mut by_difficulty = ProgressByDifficulty::default();
    let mut total_problems = 0;
    let mut total_solved = 0;

    for (difficulty, count) in totals {
        total_problems += count;
        if let Some(slot) = by_difficulty.slot(&difficulty) {
            slot.total = count;
        }
    }
    for (difficulty, count) in solved {
        total_solved += count;
        if let Some(slot) = by_difficulty.slot(&difficulty) {
            slot.solved = count;
        }
    }

    Ok(Json(ProgressSummary {
        total_solved,
        total_problems,
        by_difficulty,
    }))
}
