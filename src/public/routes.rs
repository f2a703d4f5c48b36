// src/public/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Site-wide public endpoints; per-kind listings live with their modules
pub fn public_routes() -> Router {
    Router::new()
        .route("/api/public/stats", get(handlers::get_public_stats))
        .route("/api/public/search", get(handlers::search_content))
}
