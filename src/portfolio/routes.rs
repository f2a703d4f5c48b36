use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

pub fn portfolio_routes() -> Router {
    Router::new()
        .route("/api/portfolio/templates", get(handlers::list_templates))
        .route("/api/portfolio/generate", post(handlers::generate_portfolio))
        .route("/api/portfolio/my-portfolios", get(handlers::my_portfolios))
        .route("/api/portfolio/view/:share_token", get(handlers::view_portfolio))
        .route(
            "/api/portfolio/:id",
            get(handlers::get_portfolio)
                .put(handlers::update_portfolio)
                .delete(handlers::delete_portfolio),
        )
}
