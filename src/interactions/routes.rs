// src/interactions/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn interactions_routes() -> Router {
    Router::new()
        .route("/api/interactions/saved", get(handlers::get_saved_items))
        .route(
            "/api/interactions/:content_type/:content_id/like",
            post(handlers::toggle_like),
        )
        .route(
            "/api/interactions/:content_type/:content_id/save",
            post(handlers::toggle_save),
        )
        .route(
            "/api/interactions/:content_type/:content_id/share",
            post(handlers::share_content),
        )
        .route(
            "/api/interactions/:content_type/:content_id/apply",
            post(handlers::apply_to_position),
        )
        .route(
            "/api/interactions/:content_type/:content_id/status",
            get(handlers::get_interaction_status),
        )
}
