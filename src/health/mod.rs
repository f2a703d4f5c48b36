//! Liveness endpoints used by load balancers and uptime checks.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::common::now_timestamp;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

/// GET /api/ and GET /api/health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "talentd-api",
        timestamp: now_timestamp(),
    })
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/api/", get(health))
        .route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::common::test_support::{send, test_app, test_state};

    #[tokio::test]
    async fn test_health_endpoints_report_healthy() {
        let state = test_state().await;
        let app = test_app(&state);

        for uri in ["/api/", "/api/health"] {
            let (status, body) = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["service"], "talentd-api");
            assert!(body["timestamp"].as_str().is_some());
        }
    }
}
