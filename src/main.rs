// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod admin;
mod ai;
mod articles;
mod auth;
mod common;
mod companies;
mod dsa;
mod health;
mod interactions;
mod internships;
mod jobs;
mod logging_middleware;
mod pages;
mod portfolio;
mod public;
mod rate_limit_middleware;
mod resume;
mod roadmaps;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use auth::password::{ensure_default_admin, DefaultAdmin};
use common::dev_mode::{apply_cli_override, ensure_dev_user, log_dev_mode_status, DevModeConfig};
use common::{AppState, AuthConfig};
use rate_limit_middleware::rate_limit_middleware;
use services::monitoring::{init_sentry, MonitoringConfig};
use services::{
    ExpirationConfig, ExpirationService, GoogleService, LlmService, RateLimitConfig,
    RateLimitService, SettingsService,
};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";

/// Full API router with middleware. Shared by `main` and the handler tests.
pub fn build_router(state: AppState) -> Router {
    let rate_limit_service = state.rate_limit_service.clone();
    let shared = Arc::new(RwLock::new(state));

    Router::new()
        .merge(health::health_routes())
        .merge(auth::auth_routes())
        .merge(jobs::jobs_routes())
        .merge(internships::internships_routes())
        .merge(articles::articles_routes())
        .merge(roadmaps::roadmaps_routes())
        .merge(dsa::dsa_routes())
        .merge(admin::admin_routes())
        .merge(public::public_routes())
        .merge(interactions::interactions_routes())
        .merge(companies::companies_routes())
        .merge(pages::pages_routes())
        .merge(ai::ai_routes())
        .merge(resume::resume_routes())
        .merge(portfolio::portfolio_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(middleware::from_fn(rate_limit_middleware))
        .layer(Extension(rate_limit_service))
        .layer(Extension(shared))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    let cors_origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());

    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Error-level events are forwarded to Sentry once the client is up
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer())
        .init();

    // Dropping the guard flushes pending events, so it lives until shutdown
    let _sentry_guard = init_sentry(&MonitoringConfig::from_env());

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://talentd.db".to_string());
    let share_base_url = env::var("SHARE_BASE_URL")
        .unwrap_or_else(|_| "https://talentd.com".to_string())
        .trim_end_matches('/')
        .to_string();

    let dev_mode = apply_cli_override(DevModeConfig::from_env());
    log_dev_mode_status(&dev_mode);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_options).await?;

    common::migrations::run_migrations(&pool).await?;

    if ensure_default_admin(&pool, &DefaultAdmin::from_env()).await? {
        warn!("Default admin created; change its password before going live");
    }
    let pages_created = pages::ensure_default_pages(&pool).await?;
    let templates_created = portfolio::ensure_default_templates(&pool).await?;
    info!(pages_created, templates_created, "Default content seeded");

    ensure_dev_user(&pool, &dev_mode).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let settings_service = Arc::new(SettingsService::new(pool.clone()));
    let llm_service = Arc::new(LlmService::new(settings_service.clone()));
    let google_service = Arc::new(GoogleService::new(settings_service.clone()));
    let rate_limit_service = Arc::new(RateLimitService::new(RateLimitConfig::from_env()));
    let expiration_service = Arc::new(ExpirationService::new(
        pool.clone(),
        ExpirationConfig::from_env(),
    ));
    info!("Services initialized");

    expiration_service.clone().spawn();
    rate_limit_service.clone().spawn_cleanup();

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        auth: AuthConfig::from_env(),
        share_base_url,
        dev_mode,
        settings_service,
        llm_service,
        google_service,
        rate_limit_service,
        expiration_service,
    };

    let app = build_router(app_state);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
