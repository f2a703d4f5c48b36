// src/articles/handlers/admin.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::articles::models::*;
use crate::articles::validators::ArticleValidator;
use crate::auth::AuthedAdmin;
use crate::common::helpers::{make_excerpt, normalize_timestamp, slugify, to_json_column};
use crate::common::query::{slug_taken, CONTENT_STATUSES};
use crate::common::{
    generate_article_id, now_timestamp, AdminListQuery, ApiError, AppState, SqlFilter,
    ValidationResult, Validator,
};

const DUPLICATE_SLUG: &str = "Article with this slug already exists";

pub(crate) async fn fetch_article(pool: &SqlitePool, id: &str) -> Result<Option<Article>, ApiError> {
    sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, article_id = %id, "Database error fetching article");
            ApiError::DatabaseError(e)
        })
}

async fn ensure_slug_free(pool: &SqlitePool, slug: &str, exclude_id: Option<&str>) -> Result<(), ApiError> {
    let taken = slug_taken(pool, "articles", slug, exclude_id)
        .await
        .map_err(ApiError::DatabaseError)?;
    if taken {
        return Err(ApiError::BadRequest(DUPLICATE_SLUG.to_string()));
    }
    Ok(())
}

pub(crate) async fn insert_article(
    pool: &SqlitePool,
    body: &CreateArticle,
    created_by: &str,
) -> Result<Article, ApiError> {
    ArticleValidator.validate(body).into_result()?;

    let slug = body
        .slug
        .clone()
        .unwrap_or_else(|| slugify(&body.title));
    ensure_slug_free(pool, &slug, None).await?;

    let id = generate_article_id();
    let now = now_timestamp();
    let excerpt = body
        .excerpt
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| make_excerpt(&body.content));
    let author = body
        .author
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| created_by.to_string());
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    sqlx::query(
        r#"INSERT INTO articles (
            id, title, slug, excerpt, content, featured_image, category, tags,
            reading_time_minutes, seo_meta_title, seo_meta_description, author, status,
            expiration_date, created_by, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(body.title.trim())
    .bind(&slug)
    .bind(&excerpt)
    .bind(&body.content)
    .bind(body.featured_image.as_deref())
    .bind(body.category.trim())
    .bind(to_json_column(&body.tags))
    .bind(body.reading_time_minutes)
    .bind(body.seo_meta_title.as_deref())
    .bind(body.seo_meta_description.as_deref())
    .bind(&author)
    .bind(body.status.as_deref().unwrap_or("draft"))
    .bind(expiration.as_deref())
    .bind(created_by)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(error = %e, article_id = %id, slug = %slug, "Database error creating article");
        ApiError::DatabaseError(e)
    })?;

    info!(article_id = %id, slug = %slug, admin = %created_by, "Article created");

    fetch_article(pool, &id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("Failed to create article".to_string()))
}

/// POST /api/admin/articles
pub async fn admin_create_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateArticle>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let article = insert_article(&state.db, &body, &admin.username).await?;
    Ok(Json(article.into()))
}

/// GET /api/admin/articles
pub async fn admin_list_articles(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let mut validation = ValidationResult::new();
    validation.check_one_of("status", params.status.as_deref(), &CONTENT_STATUSES);
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    if let Some(status) = &params.status {
        filter.push("status = ?", status.as_str());
    }
    if let Some(category) = &params.category {
        filter.push("category = ?", category.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "excerpt", "content"], search);
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
            error!(error = %e, "Database error listing articles");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

/// GET /api/admin/articles/:id
pub async fn admin_get_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let article = fetch_article(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;
    Ok(Json(article.into()))
}

/// PUT /api/admin/articles/:id
pub async fn admin_update_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateArticle>,
) -> Result<Json<ArticleResponse>, ApiError> {
    ArticleValidator.validate(&body).into_result()?;

    let state = state_lock.read().await.clone();
    if let Some(slug) = &body.slug {
        ensure_slug_free(&state.db, slug, Some(&id)).await?;
    }

    let now = now_timestamp();
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    let result = sqlx::query(
        r#"UPDATE articles SET
            title = COALESCE(?, title),
            slug = COALESCE(?, slug),
            excerpt = COALESCE(?, excerpt),
            content = COALESCE(?, content),
            featured_image = COALESCE(?, featured_image),
            category = COALESCE(?, category),
            tags = COALESCE(?, tags),
            reading_time_minutes = COALESCE(?, reading_time_minutes),
            seo_meta_title = COALESCE(?, seo_meta_title),
            seo_meta_description = COALESCE(?, seo_meta_description),
            author = COALESCE(?, author),
            status = COALESCE(?, status),
            expiration_date = COALESCE(?, expiration_date),
            updated_at = ?
        WHERE id = ?"#,
    )
    .bind(body.title.as_deref())
    .bind(body.slug.as_deref())
    .bind(body.excerpt.as_deref())
    .bind(body.content.as_deref())
    .bind(body.featured_image.as_deref())
    .bind(body.category.as_deref())
    .bind(body.tags.as_ref().map(to_json_column))
    .bind(body.reading_time_minutes)
    .bind(body.seo_meta_title.as_deref())
    .bind(body.seo_meta_description.as_deref())
    .bind(body.author.as_deref())
    .bind(body.status.as_deref())
    .bind(expiration.as_deref())
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, article_id = %id, admin = %admin.username, "Database error updating article");
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }

    let article = fetch_article(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;
    Ok(Json(article.into()))
}

/// DELETE /api/admin/articles/:id
pub async fn admin_delete_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, article_id = %id, admin = %admin.username, "Database error deleting article");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }

    info!(article_id = %id, admin = %admin.username, "Article deleted");
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}
