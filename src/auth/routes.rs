//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{admin, google, user};

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/login`, `POST /api/auth/register`, `GET /api/auth/me`,
///   `POST /api/auth/refresh`, `GET /api/auth/health` - admin accounts
/// - `/api/user-auth/*` - site users signing in with a Google profile
/// - `/api/auth/google/*` - server-side Google OAuth flow
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(admin::login))
        .route("/api/auth/register", post(admin::register))
        .route("/api/auth/me", get(admin::me))
        .route("/api/auth/refresh", post(admin::refresh))
        .route("/api/auth/health", get(admin::health))
        .route("/api/user-auth/google-login", post(user::google_login))
        .route("/api/user-auth/me", get(user::me))
        .route("/api/user-auth/refresh", post(user::refresh))
        .route("/api/user-auth/logout", post(user::logout))
        .route("/api/auth/google/login", get(google::login_url))
        .route("/api/auth/google/callback", get(google::callback))
        .route("/api/auth/google/verify-token", post(google::verify_token))
        .route("/api/auth/google/user-info", get(google::user_info))
        .route("/api/auth/google/logout", post(google::logout))
}
