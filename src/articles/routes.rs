// src/articles/routes.rs

use axum::{routing::get, Router};

use super::handlers;

pub fn articles_routes() -> Router {
    Router::new()
        .route("/api/public/articles", get(handlers::list_published_articles))
        .route("/api/public/articles/:slug", get(handlers::get_published_article))
        .route(
            "/api/admin/articles",
            get(handlers::admin_list_articles).post(handlers::admin_create_article),
        )
        .route(
            "/api/admin/articles/:id",
            get(handlers::admin_get_article)
                .put(handlers::admin_update_article)
                .delete(handlers::admin_delete_article),
        )
}
