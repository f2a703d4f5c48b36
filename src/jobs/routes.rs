// src/jobs/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the jobs router with all job-related routes
pub fn jobs_routes() -> Router {
    Router::new()
        // Public routes
        .route("/api/public/jobs", get(handlers::list_published_jobs))
        .route("/api/public/jobs/:id", get(handlers::get_published_job))
        // Admin job management routes
        .route(
            "/api/admin/jobs",
            get(handlers::admin_list_jobs).post(handlers::admin_create_job),
        )
        .route(
            "/api/admin/jobs/:id",
            get(handlers::admin_get_job)
                .put(handlers::admin_update_job)
                .delete(handlers::admin_delete_job),
        )
        .route(
            "/api/admin/fresher-jobs",
            get(handlers::admin_list_fresher_jobs).post(handlers::admin_create_fresher_job),
        )
}
