// src/roadmaps/handlers/public.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::common::helpers::split_csv;
use crate::common::query::increment_counter;
use crate::common::{ApiError, AppState, SqlFilter};
use crate::roadmaps::models::*;

/// GET /api/public/roadmaps
pub async fn list_published_roadmaps(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<PublicRoadmapQuery>,
) -> Result<Json<Vec<RoadmapResponse>>, ApiError> {
    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    filter.push_raw("status = 'published'");
    if let Some(level) = &params.difficulty_level {
        filter.push("difficulty_level = ?", level.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "description"], search);
    }
    if let Some(tags) = &params.tags {
        filter.push_json_any("tags", &split_csv(tags));
    }

    let sql = format!(
        "SELECT * FROM roadmaps{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let roadmaps = filter
        .bind_as(sqlx::query_as::<_, Roadmap>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing published roadmaps");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(roadmaps.into_iter().map(RoadmapResponse::from).collect()))
}

/// GET /api/public/roadmaps/:slug - counts a view
pub async fn get_published_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(slug): Path<String>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let roadmap = sqlx::query_as::<_, Roadmap>(
        "SELECT * FROM roadmaps WHERE slug = ? AND status = 'published'",
    )
    .bind(&slug)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, slug = %slug, "Database error fetching roadmap");
        ApiError::DatabaseError(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Roadmap not found".to_string()))?;

    if let Err(e) = increment_counter(&state.db, "roadmaps", "views", &[roadmap.id.clone()]).await {
        warn!(error = %e, slug = %slug, "Failed to increment roadmap views");
    }

    Ok(Json(roadmap.into()))
}
