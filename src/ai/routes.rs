use super::handlers;
use axum::{routing::post, Router};

pub fn ai_routes() -> Router {
    Router::new()
        .route("/api/ai/generate-job", post(handlers::generate_job))
        .route("/api/ai/generate-internship", post(handlers::generate_internship))
        .route("/api/ai/generate-article", post(handlers::generate_article))
        .route("/api/ai/generate-roadmap", post(handlers::generate_roadmap))
        .route("/api/ai/generate-dsa-problem", post(handlers::generate_dsa_problem))
        .route("/api/ai/generate-all", post(handlers::generate_all))
        .route("/api/ai/generate", post(handlers::generate_content))
        .route("/api/ai-agent/generate/:kind", post(handlers::agent_generate))
        .route("/api/public-ai/analyze-resume", post(handlers::public_analyze_resume))
}
