// src/internships/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the internships router
pub fn internships_routes() -> Router {
    Router::new()
        .route("/api/public/internships", get(handlers::list_published_internships))
        .route("/api/public/internships/:id", get(handlers::get_published_internship))
        .route(
            "/api/admin/internships",
            get(handlers::admin_list_internships).post(handlers::admin_create_internship),
        )
        .route(
            "/api/admin/internships/:id",
            get(handlers::admin_get_internship)
                .put(handlers::admin_update_internship)
                .delete(handlers::admin_delete_internship),
        )
}
