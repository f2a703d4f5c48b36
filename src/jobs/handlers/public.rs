// src/jobs/handlers/public.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::common::helpers::{like_pattern, split_csv};
use crate::common::query::increment_counter;
use crate::common::{ApiError, AppState, SqlFilter};
use crate::jobs::models::*;

/// GET /api/public/jobs - Published jobs, newest first
pub async fn list_published_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<PublicJobQuery>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
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
    if let Some(level) = &params.experience_level {
        filter.push("experience_level = ?", level.as_str());
    }
    if let Some(job_type) = &params.job_type {
        filter.push("job_type = ?", job_type.as_str());
    }
    if let Some(remote) = params.is_remote {
        filter.push_raw(if remote { "is_remote = 1" } else { "is_remote = 0" });
    }
    if let Some(skills) = &params.skills {
        filter.push_json_any("skills_required", &split_csv(skills));
    }

    let sql = format!(
        "SELECT * FROM jobs{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let jobs = filter
        .bind_as(sqlx::query_as::<_, Job>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing published jobs");
            ApiError::DatabaseError(e)
        })?;

    let ids: Vec<String> = jobs.iter().map(|j| j.id.clone()).collect();
    if let Err(e) = increment_counter(&state.db, "jobs", "views", &ids).await {
        warn!(error = %e, "Failed to increment job views");
    }

    debug!(job_count = jobs.len(), offset, limit, "Loaded published jobs");
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /api/public/jobs/:id - Published job detail; counts a view
pub async fn get_published_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ? AND status = 'published'")
        .bind(&job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, job_id = %job_id, "Database error fetching published job");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if let Err(e) = increment_counter(&state.db, "jobs", "views", &[job_id.clone()]).await {
        warn!(error = %e, job_id = %job_id, "Failed to increment job views");
    }

    Ok(Json(job.into()))
}
