// src/public/handlers.rs

use axum::{
    extract::{Extension, Query},
    response::Json,
};
use sqlx::{FromRow, SqlitePool};
use sqlx::sqlite::SqliteRow;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::models::*;
use crate::common::query::count_rows;
use crate::common::{ApiError, AppState, SqlFilter, ValidationResult};

/// GET /api/public/stats
pub async fn get_public_stats(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<PublicStats>, ApiError> {
    let state = state_lock.read().await.clone();
    let published = |table: &'static str| count_rows(&state.db, table, Some("published"));

    let stats = PublicStats {
        total_jobs: published("jobs").await.map_err(ApiError::DatabaseError)?,
        total_internships: published("internships").await.map_err(ApiError::DatabaseError)?,
        total_articles: published("articles").await.map_err(ApiError::DatabaseError)?,
        total_roadmaps: published("roadmaps").await.map_err(ApiError::DatabaseError)?,
        community_members: COMMUNITY_MEMBERS,
        monthly_readers: MONTHLY_READERS,
    };
    Ok(Json(stats))
}

/// Published rows of `table` whose searchable columns contain `term`
async fn search_table<T>(
    pool: &SqlitePool,
    table: &'static str,
    columns: &'static str,
    search_columns: &[&str],
    term: &str,
    limit: i64,
) -> Result<Vec<T>, ApiError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut filter = SqlFilter::new();
    filter.push_raw("status = 'published'");
    filter.push_search(search_columns, term);

    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY created_at DESC LIMIT ?",
        columns,
        table,
        filter.where_sql()
    );
    filter
        .bind_as(sqlx::query_as::<_, T>(&sql))
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, table = table, "Database error during search");
            ApiError::DatabaseError(e)
        })
}

/// GET /api/public/search
pub async fn search_content(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let mut validation = ValidationResult::new();
    if params.q.trim().is_empty() {
        validation.add_error("q", "Search query is required");
    }
    validation.check_one_of("content_type", params.content_type.as_deref(), &SEARCH_KINDS);
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let limit = params.limit();
    let term = params.q.as_str();
    let mut results = SearchResults::default();

    if params.wants("jobs") {
        results.jobs = search_table(
            &state.db,
            "jobs",
            "id, title, company, location",
            &["title", "company", "description"],
            term,
            limit,
        )
        .await?;
    }
    if params.wants("internships") {
        results.internships = search_table(
            &state.db,
            "internships",
            "id, title, company, location",
            &["title", "company", "description"],
            term,
            limit,
        )
        .await?;
    }
    if params.wants("articles") {
        results.articles = search_table(
            &state.db,
            "articles",
            "id, title, slug, category",
            &["title", "excerpt", "content"],
            term,
            limit,
        )
        .await?;
    }
    if params.wants("roadmaps") {
        results.roadmaps = search_table(
            &state.db,
            "roadmaps",
            "id, title, slug, difficulty_level",
            &["title", "description"],
            term,
            limit,
        )
        .await?;
    }

    debug!(
        q = %term,
        jobs = results.jobs.len(),
        internships = results.internships.len(),
        articles = results.articles.len(),
        roadmaps = results.roadmaps.len(),
        "Search completed"
    );
    Ok(Json(results))
}
