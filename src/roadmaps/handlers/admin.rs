// src/roadmaps/handlers/admin.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::auth::AuthedAdmin;
use crate::common::helpers::{normalize_timestamp, slugify, to_json_column};
use crate::common::query::{slug_taken, CONTENT_STATUSES};
use crate::common::{
    generate_roadmap_id, now_timestamp, AdminListQuery, ApiError, AppState, SqlFilter,
    ValidationResult, Validator,
};
use crate::roadmaps::models::*;
use crate::roadmaps::validators::RoadmapValidator;

const DUPLICATE_SLUG: &str = "Roadmap with this slug already exists";

pub(crate) async fn fetch_roadmap(pool: &SqlitePool, id: &str) -> Result<Option<Roadmap>, ApiError> {
    sqlx::query_as::<_, Roadmap>("SELECT * FROM roadmaps WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, roadmap_id = %id, "Database error fetching roadmap");
            ApiError::DatabaseError(e)
        })
}

async fn ensure_slug_free(pool: &SqlitePool, slug: &str, exclude_id: Option<&str>) -> Result<(), ApiError> {
    if slug_taken(pool, "roadmaps", slug, exclude_id)
        .await
        .map_err(ApiError::DatabaseError)?
    {
        return Err(ApiError::BadRequest(DUPLICATE_SLUG.to_string()));
    }
    Ok(())
}

pub(crate) async fn insert_roadmap(
    pool: &SqlitePool,
    body: &CreateRoadmap,
    created_by: &str,
) -> Result<Roadmap, ApiError> {
    RoadmapValidator.validate(body).into_result()?;

    let slug = body.slug.clone().unwrap_or_else(|| slugify(&body.title));
    ensure_slug_free(pool, &slug, None).await?;

    let id = generate_roadmap_id();
    let now = now_timestamp();
    let steps = prepare_steps(body.steps.clone());
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    sqlx::query(
        r#"INSERT INTO roadmaps (
            id, title, slug, description, featured_image, difficulty_level,
            estimated_completion_time, tags, steps, prerequisites, status, expiration_date,
            created_by, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(body.title.trim())
    .bind(&slug)
    .bind(&body.description)
    .bind(body.featured_image.as_deref())
    .bind(&body.difficulty_level)
    .bind(body.estimated_completion_time.as_deref())
    .bind(to_json_column(&body.tags))
    .bind(to_json_column(&steps))
    .bind(to_json_column(&body.prerequisites))
    .bind(body.status.as_deref().unwrap_or("draft"))
    .bind(expiration.as_deref())
    .bind(created_by)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(error = %e, roadmap_id = %id, slug = %slug, "Database error creating roadmap");
        ApiError::DatabaseError(e)
    })?;

    info!(roadmap_id = %id, slug = %slug, steps = steps.len(), "Roadmap created");

    fetch_roadmap(pool, &id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("Failed to create roadmap".to_string()))
}

/// POST /api/admin/roadmaps
pub async fn admin_create_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateRoadmap>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let roadmap = insert_roadmap(&state.db, &body, &admin.username).await?;
    Ok(Json(roadmap.into()))
}

/// GET /api/admin/roadmaps
pub async fn admin_list_roadmaps(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Vec<RoadmapResponse>>, ApiError> {
    let mut validation = ValidationResult::new();
    validation.check_one_of("status", params.status.as_deref(), &CONTENT_STATUSES);
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    if let Some(status) = &params.status {
        filter.push("status = ?", status.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "description"], search);
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
            error!(error = %e, "Database error listing roadmaps");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(roadmaps.into_iter().map(RoadmapResponse::from).collect()))
}

/// GET /api/admin/roadmaps/:id
pub async fn admin_get_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let roadmap = fetch_roadmap(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Roadmap not found".to_string()))?;
    Ok(Json(roadmap.into()))
}

/// PUT /api/admin/roadmaps/:id
pub async fn admin_update_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateRoadmap>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    RoadmapValidator.validate(&body).into_result()?;

    let state = state_lock.read().await.clone();
    if let Some(slug) = &body.slug {
        ensure_slug_free(&state.db, slug, Some(&id)).await?;
    }

    let now = now_timestamp();
    let steps_json = body
        .steps
        .clone()
        .map(|steps| to_json_column(&prepare_steps(steps)));
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    let result = sqlx::query(
        r#"UPDATE roadmaps SET
            title = COALESCE(?, title),
            slug = COALESCE(?, slug),
            description = COALESCE(?, description),
            featured_image = COALESCE(?, featured_image),
            difficulty_level = COALESCE(?, difficulty_level),
            estimated_completion_time = COALESCE(?, estimated_completion_time),
            tags = COALESCE(?, tags),
            steps = COALESCE(?, steps),
            prerequisites = COALESCE(?, prerequisites),
            status = COALESCE(?, status),
            expiration_date = COALESCE(?, expiration_date),
            updated_at = ?
        WHERE id = ?"#,
    )
    .bind(body.title.as_deref())
    .bind(body.slug.as_deref())
    .bind(body.description.as_deref())
    .bind(body.featured_image.as_deref())
    .bind(body.difficulty_level.as_deref())
    .bind(body.estimated_completion_time.as_deref())
    .bind(body.tags.as_ref().map(to_json_column))
    .bind(steps_json.as_deref())
    .bind(body.prerequisites.as_ref().map(to_json_column))
    .bind(body.status.as_deref())
    .bind(expiration.as_deref())
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, roadmap_id = %id, admin = %admin.username, "Database error updating roadmap");
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Roadmap not found".to_string()));
    }

    let roadmap = fetch_roadmap(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Roadmap not found".to_string()))?;
    Ok(Json(roadmap.into()))
}

/// DELETE /api/admin/roadmaps/:id
pub async fn admin_delete_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = sqlx::query("DELETE FROM roadmaps WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, roadmap_id = %id, admin = %admin.username, "Database error deleting roadmap");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Roadmap not found".to_string()));
    }

    info!(roadmap_id = %id, admin = %admin.username, "Roadmap deleted");
    Ok(Json(json!({ "message": "Roadmap deleted successfully" })))
}
