// src/dsa/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// DSA corner routes plus the admin problem and taxonomy routes
pub fn dsa_routes() -> Router {
    Router::new()
        .route("/api/dsa/categories", get(handlers::list_categories))
        .route("/api/dsa/categories/:id/topics", get(handlers::list_topics))
        .route("/api/dsa/problems", get(handlers::list_problems))
        .route("/api/dsa/problems/:id", get(handlers::get_problem))
        .route("/api/dsa/problems/:id/submit", post(handlers::submit_solution))
        .route("/api/dsa/problems/:id/hints", get(handlers::get_hints))
        .route("/api/dsa/problems/:id/solution", get(handlers::get_solution))
        .route(
            "/api/dsa/problems/:id/discussions",
            get(handlers::list_discussions).post(handlers::create_discussion),
        )
        .route("/api/dsa/progress", get(handlers::get_progress))
        // Admin
        .route(
            "/api/admin/dsa-problems",
            get(handlers::admin_list_problems).post(handlers::admin_create_problem),
        )
        .route(
            "/api/admin/dsa-problems/:id",
            get(handlers::admin_get_problem)
                .put(handlers::admin_update_problem)
                .delete(handlers::admin_delete_problem),
        )
        .route("/api/admin/dsa-categories", post(handlers::admin_create_category))
        .route("/api/admin/dsa-topics", post(handlers::admin_create_topic))
}
