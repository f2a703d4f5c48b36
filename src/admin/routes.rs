// src/admin/routes.rs

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers;

pub fn admin_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/dashboard/stats",
            get(handlers::dashboard::get_dashboard_stats),
        )
        .route(
            "/api/admin/expire-content",
            post(handlers::maintenance::expire_content),
        )
        // System settings endpoints
        .route(
            "/api/admin/settings",
            get(handlers::settings::get_system_settings)
                .put(handlers::settings::update_system_settings),
        )
        .route(
            "/api/admin/settings/test-connection",
            post(handlers::settings::test_service_connection),
        )
        .route(
            "/api/admin/settings/:key",
            delete(handlers::settings::delete_system_setting),
        )
}
