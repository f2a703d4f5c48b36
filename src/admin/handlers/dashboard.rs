// src/admin/handlers/dashboard.rs

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::admin::models::{ActivityItem, DashboardStats, PopularItem};
use crate::auth::AuthedAdmin;
use crate::common::query::{count_rows, sum_column};
use crate::common::{ApiError, AppState};

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> ApiError {
    move |e| {
        error!(error = %e, "Database error fetching {} for dashboard", context);
        ApiError::DatabaseError(e)
    }
}

/// GET /api/admin/dashboard/stats
pub async fn get_dashboard_stats(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
) -> Result<Json<DashboardStats>, ApiError> {
    let state = state_lock.read().await.clone();
    let db = &state.db;

    info!(admin = %admin.username, "Fetching dashboard stats");

    let total_jobs = count_rows(db, "jobs", None).await.map_err(db_error("job count"))?;
    let total_internships = count_rows(db, "internships", None)
        .await
        .map_err(db_error("internship count"))?;
    let total_articles = count_rows(db, "articles", None)
        .await
        .map_err(db_error("article count"))?;
    let total_roadmaps = count_rows(db, "roadmaps", None)
        .await
        .map_err(db_error("roadmap count"))?;
    let total_dsa_problems = count_rows(db, "dsa_problems", None)
        .await
        .map_err(db_error("problem count"))?;
    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
        .map_err(db_error("user count"))?;

    let total_views = sum_column(db, "jobs", "views").await.map_err(db_error("views"))?
        + sum_column(db, "internships", "views")
            .await
            .map_err(db_error("views"))?;
    let total_applications = sum_column(db, "jobs", "applications")
        .await
        .map_err(db_error("applications"))?
        + sum_column(db, "internships", "applications")
            .await
            .map_err(db_error("applications"))?;

    // Latest 5 of each kind, merged newest first
    let recent_activity = sqlx::query_as::<_, ActivityItem>(
        r#"SELECT * FROM (
               SELECT * FROM (
                   SELECT 'job' AS content_type, id, title, status, created_at
                   FROM jobs ORDER BY created_at DESC LIMIT 5
               )
               UNION ALL
               SELECT * FROM (
                   SELECT 'article' AS content_type, id, title, status, created_at
                   FROM articles ORDER BY created_at DESC LIMIT 5
               )
           )
           ORDER BY created_at DESC LIMIT 10"#,
    )
    .fetch_all(db)
    .await
    .map_err(db_error("recent activity"))?;

    let popular_content = sqlx::query_as::<_, PopularItem>(
        r#"SELECT 'job' AS content_type, id, title, views, applications
           FROM jobs ORDER BY views DESC, created_at DESC LIMIT 5"#,
    )
    .fetch_all(db)
    .await
    .map_err(db_error("popular content"))?;

    Ok(Json(DashboardStats {
        total_jobs,
        total_internships,
        total_articles,
        total_roadmaps,
        total_dsa_problems,
        total_users,
        total_views,
        total_applications,
        recent_activity,
        popular_content,
    }))
}
