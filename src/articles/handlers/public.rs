// src/articles/handlers/public.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::articles::models::*;
use crate::common::helpers::split_csv;
use crate::common::query::increment_counter;
use crate::common::{ApiError, AppState, SqlFilter};

/// GET /api/public/articles
pub async fn list_published_articles(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<PublicArticleQuery>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    filter.push_raw("status = 'published'");
    if let Some(category) = &params.category {
        filter.push("category = ?", category.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "excerpt", "content"], search);
    }
    if let Some(tags) = &params.tags {
        filter.push_json_any("tags", &split_csv(tags));
    }

    let sql = format!(
        "SELECT * FROM articles{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let articles = filter
        .bind_as(sqlx::query_as::<_, Article>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing published articles");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

/// GET /api/public/articles/:slug - counts a view
pub async fn get_published_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let article = sqlx::query_as::<_, Article>(
        "SELECT * FROM articles WHERE slug = ? AND status = 'published'",
    )
    .bind(&slug)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, slug = %slug, "Database error fetching article");
        ApiError::DatabaseError(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;

    if let Err(e) = increment_counter(&state.db, "articles", "views", &[article.id.clone()]).await {
        warn!(error = %e, slug = %slug, "Failed to increment article views");
    }

    Ok(Json(article.into()))
}
