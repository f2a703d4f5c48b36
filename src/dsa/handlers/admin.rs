// src/dsa/handlers/admin.rs

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
    generate_id, generate_problem_id, now_timestamp, ApiError, AppState, EntityPrefix, SqlFilter,
    ValidationResult, Validator,
};
use crate::dsa::models::*;
use crate::dsa::validators::{DsaProblemValidator, TaxonomyValidator};

const DUPLICATE_SLUG: &str = "DSA problem with this slug already exists";

pub(crate) async fn fetch_problem(pool: &SqlitePool, id: &str) -> Result<Option<DsaProblem>, ApiError> {
    sqlx::query_as::<_, DsaProblem>("SELECT * FROM dsa_problems WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, problem_id = %id, "Database error fetching DSA problem");
            ApiError::DatabaseError(e)
        })
}

async fn ensure_slug_free(pool: &SqlitePool, slug: &str, exclude_id: Option<&str>) -> Result<(), ApiError> {
    if slug_taken(pool, "dsa_problems", slug, exclude_id)
        .await
        .map_err(ApiError::DatabaseError)?
    {
        return Err(ApiError::BadRequest(DUPLICATE_SLUG.to_string()));
    }
    Ok(())
}

pub(crate) async fn insert_problem(
    pool: &SqlitePool,
    body: &CreateDsaProblem,
    created_by: &str,
) -> Result<DsaProblem, ApiError> {
    DsaProblemValidator.validate(body).into_result()?;

    let slug = body.slug.clone().unwrap_or_else(|| slugify(&body.title));
    ensure_slug_free(pool, &slug, None).await?;

    let id = generate_problem_id();
    let now = now_timestamp();
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    sqlx::query(
        r#"INSERT INTO dsa_problems (
            id, title, slug, description, difficulty, category_id, topic_id, tags, examples,
            constraints, hints, test_cases, solution_approach, time_complexity, space_complexity,
            status, expiration_date, created_by, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(body.title.trim())
    .bind(&slug)
    .bind(&body.description)
    .bind(&body.difficulty)
    .bind(body.category_id.as_deref())
    .bind(body.topic_id.as_deref())
    .bind(to_json_column(&body.tags))
    .bind(to_json_column(&body.examples))
    .bind(to_json_column(&body.constraints))
    .bind(to_json_column(&body.hints))
    .bind(to_json_column(&body.test_cases))
    .bind(body.solution_approach.as_deref())
    .bind(body.time_complexity.as_deref())
    .bind(body.space_complexity.as_deref())
    .bind(body.status.as_deref().unwrap_or("draft"))
    .bind(expiration.as_deref())
    .bind(created_by)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %id, slug = %slug, "Database error creating DSA problem");
        ApiError::DatabaseError(e)
    })?;

    info!(problem_id = %id, slug = %slug, test_cases = body.test_cases.len(), "DSA problem created");

    fetch_problem(pool, &id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("Failed to create DSA problem".to_string()))
}

/// POST /api/admin/dsa-problems
pub async fn admin_create_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateDsaProblem>,
) -> Result<Json<DsaProblemResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let problem = insert_problem(&state.db, &body, &admin.username).await?;
    Ok(Json(problem.into()))
}

/// GET /api/admin/dsa-problems
pub async fn admin_list_problems(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<DsaAdminQuery>,
) -> Result<Json<Vec<DsaProblemResponse>>, ApiError> {
    let mut validation = ValidationResult::new();
    validation.check_one_of("status", params.status.as_deref(), &CONTENT_STATUSES);
    validation.check_one_of("difficulty", params.difficulty.as_deref(), &DIFFICULTIES);
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    if let Some(status) = &params.status {
        filter.push("status = ?", status.as_str());
    }
    if let Some(difficulty) = &params.difficulty {
        filter.push("difficulty = ?", difficulty.as_str());
    }
    if let Some(category_id) = &params.category_id {
        filter.push("category_id = ?", category_id.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "description"], search);
    }

    let sql = format!(
        "SELECT * FROM dsa_problems{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let problems = filter
        .bind_as(sqlx::query_as::<_, DsaProblem>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing DSA problems");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(problems.into_iter().map(DsaProblemResponse::from).collect()))
}

/// GET /api/admin/dsa-problems/:id
pub async fn admin_get_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<DsaProblemResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let problem = fetch_problem(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("DSA problem not found".to_string()))?;
    Ok(Json(problem.into()))
}

/// PUT /api/admin/dsa-problems/:id
pub async fn admin_update_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateDsaProblem>,
) -> Result<Json<DsaProblemResponse>, ApiError> {
    DsaProblemValidator.validate(&body).into_result()?;

    let state = state_lock.read().await.clone();
    if let Some(slug) = &body.slug {
        ensure_slug_free(&state.db, slug, Some(&id)).await?;
    }

    let now = now_timestamp();
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    let result = sqlx::query(
        r#"UPDATE dsa_problems SET
            title = COALESCE(?, title),
            slug = COALESCE(?, slug),
            description = COALESCE(?, description),
            difficulty = COALESCE(?, difficulty),
            category_id = COALESCE(?, category_id),
            topic_id = COALESCE(?, topic_id),
            tags = COALESCE(?, tags),
            examples = COALESCE(?, examples),
            constraints = COALESCE(?, constraints),
            hints = COALESCE(?, hints),
            test_cases = COALESCE(?, test_cases),
            solution_approach = COALESCE(?, solution_approach),
            time_complexity = COALESCE(?, time_complexity),
            space_complexity = COALESCE(?, space_complexity),
            status = COALESCE(?, status),
            expiration_date = COALESCE(?, expiration_date),
            updated_at = ?
        WHERE id = ?"#,
    )
    .bind(body.title.as_deref())
    .bind(body.slug.as_deref())
    .bind(body.description.as_deref())
    .bind(body.difficulty.as_deref())
    .bind(body.category_id.as_deref())
    .bind(body.topic_id.as_deref())
    .bind(body.tags.as_ref().map(to_json_column))
    .bind(body.examples.as_ref().map(to_json_column))
    .bind(body.constraints.as_ref().map(to_json_column))
    .bind(body.hints.as_ref().map(to_json_column))
    .bind(body.test_cases.as_ref().map(to_json_column))
    .bind(body.solution_approach.as_deref())
    .bind(body.time_complexity.as_deref())
    .bind(body.space_complexity.as_deref())
    .bind(body.status.as_deref())
    .bind(expiration.as_deref())
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %id, admin = %admin.username, "Database error updating DSA problem");
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("DSA problem not found".to_string()));
    }

    let problem = fetch_problem(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("DSA problem not found".to_string()))?;
    Ok(Json(problem.into()))
}

/// DELETE /api/admin/dsa-problems/:id
pub async fn admin_delete_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = sqlx::query("DELETE FROM dsa_problems WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, problem_id = %id, admin = %admin.username, "Database error deleting DSA problem");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("DSA problem not found".to_string()));
    }

    info!(problem_id = %id, admin = %admin.username, "DSA problem deleted");
    Ok(Json(json!({ "message": "DSA problem deleted successfully" })))
}

// ============================================================================
// Taxonomy
// ============================================================================

/// POST /api/admin/dsa-categories
pub async fn admin_create_category(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateCategory>,
) -> Result<Json<DsaCategory>, ApiError> {
    TaxonomyValidator.validate(&body).into_result()?;
    let state = state_lock.read().await.clone();

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dsa_categories WHERE name = ?")
        .bind(body.name.trim())
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if existing > 0 {
        return Err(ApiError::BadRequest("Category already exists".to_string()));
    }

    let category = DsaCategory {
        id: generate_id(EntityPrefix::Category),
        name: body.name.trim().to_string(),
        description: body.description,
        created_at: now_timestamp(),
    };

    sqlx::query("INSERT INTO dsa_categories (id, name, description, created_at) VALUES (?, ?, ?, ?)")
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.description.as_deref())
        .bind(&category.created_at)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, admin = %admin.username, "Database error creating DSA category");
            ApiError::DatabaseError(e)
        })?;

    info!(category_id = %category.id, name = %category.name, "DSA category created");
    Ok(Json(category))
}

/// POST /api/admin/dsa-topics
pub async fn admin_create_topic(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateTopic>,
) -> Result<Json<DsaTopic>, ApiError> {
    TaxonomyValidator.validate(&body).into_result()?;
    let state = state_lock.read().await.clone();

    let category_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dsa_categories WHERE id = ?")
        .bind(&body.category_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if category_exists == 0 {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    let topic = DsaTopic {
        id: generate_id(EntityPrefix::Topic),
        category_id: body.category_id,
        name: body.name.trim().to_string(),
        description: body.description,
        created_at: now_timestamp(),
    };

    sqlx::query(
        "INSERT INTO dsa_topics (id, category_id, name, description, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&topic.id)
    .bind(&topic.category_id)
    .bind(&topic.name)
    .bind(topic.description.as_deref())
    .bind(&topic.created_at)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, admin = %admin.username, "Database error creating DSA topic");
        ApiError::DatabaseError(e)
    })?;

    info!(topic_id = %topic.id, category_id = %topic.category_id, "DSA topic created");
    Ok(Json(topic))
}
