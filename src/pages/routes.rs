use super::handlers;
use axum::{routing::get, Router};

pub fn pages_routes() -> Router {
    Router::new()
        .route("/api/pages", get(handlers::list_pages))
        .route("/api/pages/:slug", get(handlers::get_page))
}
