// src/jobs/handlers/admin.rs

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
    generate_job_id, now_timestamp, AdminListQuery, ApiError, AppState, SqlFilter,
    ValidationResult, Validator,
};
use crate::jobs::models::*;
use crate::jobs::validators::JobValidator;

pub(crate) async fn fetch_job(pool: &SqlitePool, id: &str) -> Result<Option<Job>, ApiError> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, job_id = %id, "Database error fetching job");
            ApiError::DatabaseError(e)
        })
}

/// Validates and stores a new job, returning the stored row
pub(crate) async fn insert_job(
    pool: &SqlitePool,
    body: &CreateJob,
    created_by: &str,
) -> Result<Job, ApiError> {
    JobValidator.validate(body).into_result()?;

    let id = generate_job_id();
    let now = now_timestamp();
    let status = body.status.as_deref().unwrap_or("draft");
    let deadline = body.application_deadline.as_deref().and_then(normalize_timestamp);
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    sqlx::query(
        r#"INSERT INTO jobs (
            id, title, company, company_logo, description, requirements, responsibilities,
            location, salary_min, salary_max, salary_currency, job_type, experience_level,
            skills_required, benefits, application_url, application_deadline, is_remote, tags,
            status, expiration_date, created_by, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(body.title.trim())
    .bind(body.company.trim())
    .bind(body.company_logo.as_deref())
    .bind(&body.description)
    .bind(to_json_column(&body.requirements))
    .bind(to_json_column(&body.responsibilities))
    .bind(body.location.trim())
    .bind(body.salary_min)
    .bind(body.salary_max)
    .bind(body.salary_currency.as_deref().unwrap_or("INR"))
    .bind(&body.job_type)
    .bind(&body.experience_level)
    .bind(to_json_column(&body.skills_required))
    .bind(to_json_column(&body.benefits))
    .bind(body.application_url.as_deref())
    .bind(deadline.as_deref())
    .bind(i64::from(body.is_remote))
    .bind(to_json_column(&body.tags))
    .bind(status)
    .bind(expiration.as_deref())
    .bind(created_by)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            job_id = %id,
            title = %body.title,
            admin = %created_by,
            "Database error creating job"
        );
        ApiError::DatabaseError(e)
    })?;

    info!(job_id = %id, admin = %created_by, "Job created");

    fetch_job(pool, &id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("Failed to create job".to_string()))
}

async fn list_jobs_filtered(
    pool: &SqlitePool,
    params: &AdminListQuery,
    experience_level: Option<&str>,
) -> Result<Vec<JobResponse>, ApiError> {
    let mut validation = ValidationResult::new();
    validation.check_one_of("status", params.status.as_deref(), &CONTENT_STATUSES);
    validation.into_result()?;

    let (offset, limit) = params.window();
    let mut filter = SqlFilter::new();
    if let Some(status) = &params.status {
        filter.push("status = ?", status.as_str());
    }
    if let Some(level) = experience_level {
        filter.push("experience_level = ?", level);
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "description"], search);
    }

    let sql = format!(
        "SELECT * FROM jobs{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let jobs = filter
        .bind_as(sqlx::query_as::<_, Job>(&sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing jobs");
            ApiError::DatabaseError(e)
        })?;

    Ok(jobs.into_iter().map(JobResponse::from).collect())
}

/// POST /api/admin/jobs - Create a new job
pub async fn admin_create_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(body): Json<CreateJob>,
) -> Result<Json<JobResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let job = insert_job(&state.db, &body, &admin.username).await?;
    Ok(Json(job.into()))
}

/// GET /api/admin/jobs - List jobs with pagination and filtering
pub async fn admin_list_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let state = state_lock.read().await.clone();
    Ok(Json(list_jobs_filtered(&state.db, &params, None).await?))
}

/// GET /api/admin/jobs/:id
pub async fn admin_get_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let job = fetch_job(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;
    Ok(Json(job.into()))
}

/// PUT /api/admin/jobs/:id - Partial update; absent fields stay unchanged
pub async fn admin_update_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateJob>,
) -> Result<Json<JobResponse>, ApiError> {
    JobValidator.validate(&body).into_result()?;

    let state = state_lock.read().await.clone();
    let now = now_timestamp();
    let deadline = body.application_deadline.as_deref().and_then(normalize_timestamp);
    let expiration = body.expiration_date.as_deref().and_then(normalize_timestamp);

    let result = sqlx::query(
        r#"UPDATE jobs SET
            title = COALESCE(?, title),
            company = COALESCE(?, company),
            company_logo = COALESCE(?, company_logo),
            description = COALESCE(?, description),
            requirements = COALESCE(?, requirements),
            responsibilities = COALESCE(?, responsibilities),
            location = COALESCE(?, location),
            salary_min = COALESCE(?, salary_min),
            salary_max = COALESCE(?, salary_max),
            salary_currency = COALESCE(?, salary_currency),
            job_type = COALESCE(?, job_type),
            experience_level = COALESCE(?, experience_level),
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
    .bind(body.salary_min)
    .bind(body.salary_max)
    .bind(body.salary_currency.as_deref())
    .bind(body.job_type.as_deref())
    .bind(body.experience_level.as_deref())
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
        error!(error = %e, job_id = %id, admin = %admin.username, "Database error updating job");
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    let job = fetch_job(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;
    Ok(Json(job.into()))
}

/// DELETE /api/admin/jobs/:id
pub async fn admin_delete_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, job_id = %id, admin = %admin.username, "Database error deleting job");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    info!(job_id = %id, admin = %admin.username, "Job deleted");
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}

// ============================================================================
// Fresher Jobs
// ============================================================================

/// GET /api/admin/fresher-jobs
pub async fn admin_list_fresher_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _admin: AuthedAdmin,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let state = state_lock.read().await.clone();
    Ok(Json(
        list_jobs_filtered(&state.db, &params, Some("fresher")).await?,
    ))
}

/// POST /api/admin/fresher-jobs - Same as a job create with experience_level forced to fresher
pub async fn admin_create_fresher_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(mut body): Json<CreateJob>,
) -> Result<Json<JobResponse>, ApiError> {
    body.experience_level = "fresher".to_string();
    let state = state_lock.read().await.clone();
    let job = insert_job(&state.db, &body, &admin.username).await?;
    Ok(Json(job.into()))
}
