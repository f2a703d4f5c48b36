// src/roadmaps/routes.rs

use axum::{routing::get, Router};

use super::handlers;

pub fn roadmaps_routes() -> Router {
    Router::new()
        .route("/api/public/roadmaps", get(handlers::list_published_roadmaps))
        .route("/api/public/roadmaps/:slug", get(handlers::get_published_roadmap))
        .route(
            "/api/admin/roadmaps",
            get(handlers::admin_list_roadmaps).post(handlers::admin_create_roadmap),
        )
        .route(
            "/api/admin/roadmaps/:id",
            get(handlers::admin_get_roadmap)
                .put(handlers::admin_update_roadmap)
                .delete(handlers::admin_delete_roadmap),
        )
}
