// src/pages/handlers.rs

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

use super::models::{Page, PageSummary};
use crate::common::{ApiError, AppState};

/// GET /api/pages
pub async fn list_pages(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let pages = sqlx::query_as::<_, PageSummary>(
        "SELECT slug, title, meta_description FROM pages WHERE status = 'published' ORDER BY title ASC LIMIT 100",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error listing pages");
        ApiError::DatabaseError(e)
    })?;

    Ok(Json(json!({ "pages": pages })))
}

/// GET /api/pages/:slug
pub async fn get_page(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = ? AND status = 'published'")
        .bind(&slug)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, slug = %slug, "Database error fetching page");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Page not found".to_string()))?;

    Ok(Json(json!({ "page": page })))
}
