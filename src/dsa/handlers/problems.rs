// src/dsa/handlers/problems.rs

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::{AuthedUser, MaybeUser};
use crate::common::query::increment_counter;
use crate::common::{
    generate_id, now_timestamp, ApiError, AppState, EntityPrefix, SqlFilter, ValidationResult,
};
use crate::dsa::judge::judge;
use crate::dsa::models::*;

pub(crate) async fn published_problem(pool: &SqlitePool, id: &str) -> Result<DsaProblem, ApiError> {
    sqlx::query_as::<_, DsaProblem>("SELECT * FROM dsa_problems WHERE id = ? AND status = 'published'")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, problem_id = %id, "Database error fetching DSA problem");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))
}

async fn fetch_progress(
    pool: &SqlitePool,
    user_id: &str,
    problem_id: &str,
) -> Result<Option<UserProgress>, ApiError> {
    sqlx::query_as::<_, UserProgress>(
        "SELECT * FROM dsa_user_progress WHERE user_id = ? AND problem_id = ?",
    )
    .bind(user_id)
    .bind(problem_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, problem_id = %problem_id, "Database error fetching progress");
        ApiError::DatabaseError(e)
    })
}

/// GET /api/dsa/categories
pub async fn list_categories(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let categories = sqlx::query_as::<_, DsaCategory>("SELECT * FROM dsa_categories ORDER BY name")
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing DSA categories");
            ApiError::DatabaseError(e)
        })?;
    Ok(Json(json!({ "categories": categories })))
}

/// GET /api/dsa/categories/:id/topics
pub async fn list_topics(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(category_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let topics = sqlx::query_as::<_, DsaTopic>(
        "SELECT * FROM dsa_topics WHERE category_id = ? ORDER BY name",
    )
    .bind(&category_id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, category_id = %category_id, "Database error listing DSA topics");
        ApiError::DatabaseError(e)
    })?;
    Ok(Json(json!({ "topics": topics })))
}

/// GET /api/dsa/problems - signed-in callers also get their status per problem
pub async fn list_problems(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeUser(viewer): MaybeUser,
    Query(params): Query<ProblemQuery>,
) -> Result<Json<ProblemPage>, ApiError> {
    let mut validation = ValidationResult::new();
    validation.check_one_of("difficulty", params.difficulty.as_deref(), &DIFFICULTIES);
    validation.into_result()?;

    let state = state_lock.read().await.clone();
    let (offset, limit) = params.window();

    let mut filter = SqlFilter::new();
    filter.push_raw("status = 'published'");
    if let Some(topic_id) = &params.topic_id {
        filter.push("topic_id = ?", topic_id.as_str());
    }
    if let Some(category_id) = &params.category_id {
        filter.push("category_id = ?", category_id.as_str());
    }
    if let Some(difficulty) = &params.difficulty {
        filter.push("difficulty = ?", difficulty.as_str());
    }
    if let Some(search) = &params.search {
        filter.push_search(&["title", "tags"], search);
    }

    let count_sql = format!("SELECT COUNT(*) FROM dsa_problems{}", filter.where_sql());
    let total = filter
        .bind_scalar(sqlx::query_scalar::<_, i64>(&count_sql))
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error counting DSA problems");
            ApiError::DatabaseError(e)
        })?;

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

    let statuses: HashMap<String, String> = match &viewer {
        Some(user) => sqlx::query_as::<_, (String, String)>(
            "SELECT problem_id, status FROM dsa_user_progress WHERE user_id = ?",
        )
        .bind(&user.id)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .into_iter()
        .collect(),
        None => HashMap::new(),
    };

    let problems = problems
        .into_iter()
        .map(|p| {
            let mut problem = DsaProblemResponse::from(p).public_view();
            problem.user_status = statuses.get(&problem.id).cloned();
            problem
        })
        .collect();
    Ok(Json(ProblemPage::new(problems, total, offset, limit)))
}

/// GET /api/dsa/problems/:id - counts an attempt
pub async fn get_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<ProblemDetail>, ApiError> {
    let state = state_lock.read().await.clone();
    let problem = published_problem(&state.db, &id).await?;
    let user_progress = fetch_progress(&state.db, &user.id, &id).await?;

    let recent_submissions = sqlx::query_as::<_, Submission>(
        r#"SELECT * FROM dsa_submissions
           WHERE user_id = ? AND problem_id = ?
           ORDER BY submitted_at DESC, rowid DESC LIMIT 10"#,
    )
    .bind(&user.id)
    .bind(&id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %id, "Database error listing submissions");
        ApiError::DatabaseError(e)
    })?;

    if let Err(e) = increment_counter(&state.db, "dsa_problems", "attempts", &[id.clone()]).await {
        warn!(error = %e, problem_id = %id, "Failed to increment problem attempts");
    }

    Ok(Json(ProblemDetail {
        problem: DsaProblemResponse::from(problem).public_view(),
        user_progress,
        recent_submissions,
    }))
}

/// POST /api/dsa/problems/:id/submit
pub async fn submit_solution(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    Json(body): Json<SubmitSolution>,
) -> Result<Json<SubmissionResult>, ApiError> {
    if body.code.trim().is_empty() {
        return Err(ApiError::BadRequest("Code is required".to_string()));
    }

    let state = state_lock.read().await.clone();
    let problem = published_problem(&state.db, &id).await?;
    let verdict = judge(&problem.test_cases(), &body.outputs);

    let submission_id = generate_id(EntityPrefix::Submission);
    let now = now_timestamp();
    let (progress_status, best_solution, best_language, solved_at) = if verdict.is_accepted() {
        ("solved", Some(body.code.as_str()), Some(body.language.as_str()), Some(now.as_str()))
    } else {
        ("in_progress", None, None, None)
    };

    let mut tx = state.db.begin().await.map_err(ApiError::DatabaseError)?;

    sqlx::query(
        r#"INSERT INTO dsa_submissions (
            id, problem_id, user_id, code, language, status, test_cases_passed,
            total_test_cases, submitted_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&submission_id)
    .bind(&id)
    .bind(&user.id)
    .bind(&body.code)
    .bind(&body.language)
    .bind(verdict.status)
    .bind(verdict.passed)
    .bind(verdict.total)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %id, user_id = %user.id, "Database error recording submission");
        ApiError::DatabaseError(e)
    })?;

    // A solved problem stays solved; the latest accepted code becomes the best solution
    sqlx::query(
        r#"INSERT INTO dsa_user_progress (
            user_id, problem_id, status, attempts, best_solution, best_language,
            last_attempted, solved_at
        ) VALUES (?, ?, ?, 1, ?, ?, ?, ?)
        ON CONFLICT(user_id, problem_id) DO UPDATE SET
            attempts = dsa_user_progress.attempts + 1,
            last_attempted = excluded.last_attempted,
            status = CASE WHEN dsa_user_progress.status = 'solved' THEN 'solved' ELSE excluded.status END,
            best_solution = COALESCE(excluded.best_solution, dsa_user_progress.best_solution),
            best_language = COALESCE(excluded.best_language, dsa_user_progress.best_language),
            solved_at = COALESCE(dsa_user_progress.solved_at, excluded.solved_at)"#,
    )
    .bind(&user.id)
    .bind(&id)
    .bind(progress_status)
    .bind(best_solution)
    .bind(best_language)
    .bind(&now)
    .bind(solved_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, problem_id = %id, user_id = %user.id, "Database error updating progress");
        ApiError::DatabaseError(e)
    })?;

    sqlx::query(
        r#"UPDATE dsa_problems SET
            attempts = attempts + 1,
            solved_count = solved_count + ?
        WHERE id = ?"#,
    )
    .bind(if verdict.is_accepted() { 1_i64 } else { 0 })
    .bind(&id)
    .execute(&mut *tx)
    .await
    .map_err(ApiError::DatabaseError)?;

    tx.commit().await.map_err(ApiError::DatabaseError)?;

    info!(
        submission_id = %submission_id,
        problem_id = %id,
        user_id = %user.id,
        status = verdict.status,
        passed = verdict.passed,
        total = verdict.total,
        "Solution submitted"
    );

    Ok(Json(SubmissionResult {
        submission_id,
        status: verdict.status.to_string(),
        test_cases_passed: verdict.passed,
        total_test_cases: verdict.total,
        message: "Solution submitted successfully".to_string(),
    }))
}

/// GET /api/dsa/problems/:id/hints
pub async fn get_hints(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let problem = published_problem(&state.db, &id).await?;
    Ok(Json(json!({ "hints": problem.hints() })))
}

/// GET /api/dsa/problems/:id/solution - only after at least one submission
pub async fn get_solution(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<SolutionView>, ApiError> {
    let state = state_lock.read().await.clone();
    let problem = published_problem(&state.db, &id).await?;

    let progress = fetch_progress(&state.db, &user.id, &id)
        .await?
        .filter(|p| p.attempts > 0)
        .ok_or_else(|| ApiError::Forbidden("Attempt the problem first to view solution".to_string()))?;

    Ok(Json(SolutionView {
        solution_approach: problem.solution_approach,
        time_complexity: problem.time_complexity,
        space_complexity: problem.space_complexity,
        user_best_solution: progress.best_solution,
    }))
}
