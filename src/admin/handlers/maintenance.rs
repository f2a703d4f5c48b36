// src/admin/handlers/maintenance.rs

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::auth::AuthedAdmin;
use crate::common::{ApiError, AppState};
use crate::services::ExpirationReport;

/// POST /api/admin/expire-content - one sweep, right now
pub async fn expire_content(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
) -> Result<Json<ExpirationReport>, ApiError> {
    let state = state_lock.read().await.clone();

    let report = state.expiration_service.run_once().await.map_err(|e| {
        error!(error = %e, admin = %admin.username, "Manual expiration sweep failed");
        ApiError::DatabaseError(e)
    })?;

    info!(admin = %admin.username, touched = report.total(), "Manual expiration sweep finished");
    Ok(Json(report))
}
