// src/internships/handlers/public.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::common::helpers::{like_pattern, split_csv};
use crate::common::query::increment_counter;
use crate::common::{ApiError, AppState, SqlFilter};
use crate::internships::models::*;

/// GET /api/public/internships
pub async fn list_published_internships(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<PublicInternshipQuery>,
) -> Result<Json<Vec<InternshipResponse>>, ApiError> {
    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    filter.push_raw("status = 'published'");
    if let Some(search) = &params.search {
        filter.push_search(&["title", "company", "description"], search);
    }
    if let Some(location) = params.location.as_deref().filter(|l| !l.trim().is_empty()) {
        filter.push("LOWER(location) LIKE ? ESCAPE '\\'", like_pattern(location));
    }
    if let Some(months) = params.duration {
        filter.push("duration_months = ?", months.to_string());
    }
    if let Some(remote) = params.is_remote {
        filter.push_raw(if remote { "is_remote = 1" } else { "is_remote = 0" });
    }
    if let Some(skills) = &params.skills {
        filter.push_json_any("skills_required", &split_csv(skills));
    }

    let sql = format!(
        "SELECT * FROM internships{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let internships = filter
        .bind_as(sqlx::query_as::<_, Internship>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing published internships");
            ApiError::DatabaseError(e)
        })?;

    let ids: Vec<String> = internships.iter().map(|i| i.id.clone()).collect();
    if let Err(e) = increment_counter(&state.db, "internships", "views", &ids).await {
        warn!(error = %e, "Failed to increment internship views");
    }

    Ok(Json(
        internships.into_iter().map(InternshipResponse::from).collect(),
    ))
}

/// GET /api/public/internships/:id
pub async fn get_published_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(internship_id): Path<String>,
) -> Result<Json<InternshipResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let internship = sqlx::query_as::<_, Internship>(
        "SELECT * FROM internships WHERE id = ? AND status = 'published'",
    )
    .bind(&internship_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, internship_id = %internship_id, "Database error fetching internship");
        ApiError::DatabaseError(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Internship not found".to_string()))?;

    if let Err(e) =
        increment_counter(&state.db, "internships", "views", &[internship_id.clone()]).await
    {
        warn!(error = %e, internship_id = %internship_id, "Failed to increment internship views");
    }

    Ok(Json(internship.into()))
}
