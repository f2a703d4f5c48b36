use super::handlers;
use axum::{routing::get, Router};

/// Public company views built from published listings
pub fn companies_routes() -> Router {
    Router::new()
        .route("/api/companies/search", get(handlers::search_companies))
        .route("/api/companies/stats/industries", get(handlers::get_industry_stats))
        .route("/api/companies/:name", get(handlers::get_company_profile))
        .route("/api/companies/:name/jobs", get(handlers::get_company_jobs))
        .route(
            "/api/companies/:name/internships",
            get(handlers::get_company_internships),
        )
}
