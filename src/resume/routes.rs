use super::handlers;
use axum::{routing::post, Router};

/// Resume tools for signed-in users
pub fn resume_routes() -> Router {
    Router::new()
        .route("/api/resume/upload-analyze", post(handlers::upload_and_analyze))
        .route("/api/resume/upload-parse", post(handlers::upload_and_parse))
        .route("/api/resume/analyze-text", post(handlers::analyze_text))
        .route("/api/resume/parse", post(handlers::parse_text))
}
