// src/internships/handlers/admin.rs

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
use crate::common::helpers::{normalize_timestamp, to_json_column};
use crate::common::query::CONTENT_STATUSES;
use crate::common::{
    generate_internship_id, now_timestamp, AdminListQuery, ApiError, AppState, SqlFilter,
    ValidationResult, Validator,
};
use crate::internships::models::*;
use crate::internships::validators::InternshipValidator;

pub(crate) async fn fetch_internship(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Internship>, ApiError> {
    sqlx::query_as::<_, Internship>("SELECT * FROM internships WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, internship_id = %id, "Database error fetching internship");
            ApiError::DatabaseError(e)
        })
}

pub(crate) async fn insert_internship(
    pool: &SqlitePool,
    body: &CreateInternship,
    created_by: &str,
) -> Result<Internship, ApiError> {
    InternshipValidator.validate(body).into_result()?;

    let id = generate_internship_id();
    let now = now_timestamp();
    let deadline = body.application_deadline.as_deref().and_then(normalize_timestamp);
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    sqlx::query(
        r#"INSERT INTO internships (
            id, title, company, company_logo, description, requirements, responsibilities,
            location, stipend, duration_months, skills_required, benefits, application_url,
            application_deadline, is_remote, tags, status, expiration_date, created_by,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(body.title.trim())
    .bind(body.company.trim())
    .bind(body.company_logo.as_deref())
    .bind(&body.description)
    .bind(to_json_column(&body.requirements))
    .bind(to_json_column(&body.responsibilities))
    .bind(body.location.trim())
    .bind(body.stipend)
    .bind(body.resolved_duration_months())
    .bind(to_json_column(&body.skills_required))
    .bind(to_json_column(&body.benefits))
    .bind(body.application_url.as_deref())
    .bind(deadline.as_deref())
    .bind(i64::from(body.is_remote))
    .bind(to_json_column(&body.tags))
    .bind(body.status.as_deref().unwrap_or("draft"))
    .bind(expiration.as_deref())
    .bind(created_by)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            internship_id = %id,
            admin = %created_by,
            "Database error creating internship"
        );
        ApiError::DatabaseError(e)
    })?;

    info!(internship_id = %id, admin = %created_by, "Internship created");

    fetch_internship(pool, &id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("Failed to create internship".to_string()))
}

/// POST /api/admin/internships
pub async fn admin_create_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateInternship>,
) -> Result<Json<InternshipResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let internship = insert_internship(&state.db, &body, &admin.username).await?;
    Ok(Json(internship.into()))
}

/// GET /api/admin/internships
pub async fn admin_list_internships(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Vec<InternshipResponse>>, ApiError> {
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
            error!(error = %e, "Database error listing internships");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(
        internships.into_iter().map(InternshipResponse::from).collect(),
    ))
}

/// GET /api/admin/internships/:id
pub async fn admin_get_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<InternshipResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let internship = fetch_internship(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Internship not found".to_string()))?;
    Ok(Json(internship.into()))
}

/// PUT /api/admin/internships/:id
pub async fn admin_update_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateInternship>,
) -> Result<Json<InternshipResponse>, ApiError> {
    InternshipValidator.validate(&body).into_result()?;

    let state = state_lock.read().await.clone();
    let now = now_timestamp();
    let deadline = body.application_deadline.as_deref().and_then(normalize_timestamp);
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    let result = sqlx::query(
        r#"UPDATE internships SET
            title = COALESCE(?, title),
            company = COALESCE(?, company),
            company_logo = COALESCE(?, company_logo),
            description = COALESCE(?, description),
            requirements = COALESCE(?, requirements),
            responsibilities = COALESCE(?, responsibilities),
            location = COALESCE(?, location),
            stipend = COALESCE(?, stipend),
            duration_months = COALESCE(?, duration_months),
            skills_required = COALESCE(?, skills_required),
            benefits = COALESCE(?, benefits),
            application_url = COALESCE(?, application_url),
            application_deadline = COALESCE(?, application_deadline),
            is_remote = COALESCE(?, is_remote),
            tags = COALESCE(?, tags),
            status = COALESCE(?, status),
            expiration_date = COALESCE(?, expiration_date),
            updated_at = ?
        WHERE id = ?"#,
    )
    .bind(body.title.as_deref())
    .bind(body.company.as_deref())
    .bind(body.company_logo.as_deref())
    .bind(body.description.as_deref())
    .bind(body.requirements.as_ref().map(to_json_column))
    .bind(body.responsibilities.as_ref().map(to_json_column))
    .bind(body.location.as_deref())
    .bind(body.stipend)
    .bind(body.resolved_duration_months())
    .bind(body.skills_required.as_ref().map(to_json_column))
    .bind(body.benefits.as_ref().map(to_json_column))
    .bind(body.application_url.as_deref())
    .bind(deadline.as_deref())
    .bind(body.is_remote.map(i64::from))
    .bind(body.tags.as_ref().map(to_json_column))
    .bind(body.status.as_deref())
    .bind(expiration.as_deref())
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            internship_id = %id,
            admin = %admin.username,
            "Database error updating internship"
        );
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Internship not found".to_string()));
    }

    let internship = fetch_internship(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Internship not found".to_string()))?;
    Ok(Json(internship.into()))
}

/// DELETE /api/admin/internships/:id
pub async fn admin_delete_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = sqlx::query("DELETE FROM internships WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                internship_id = %id,
                admin = %admin.username,
                "Database error deleting internship"
            );
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Internship not found".to_string()));
    }

    info!(internship_id = %id, admin = %admin.username, "Internship deleted");
    Ok(Json(json!({ "message": "Internship deleted successfully" })))
}
