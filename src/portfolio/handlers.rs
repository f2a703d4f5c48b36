// src/portfolio/handlers.rs

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use super::models::*;
use super::renderer::render_portfolio;
use crate::auth::AuthedUser;
use crate::common::helpers::to_json_column;
use crate::common::{generate_id, now_timestamp, ApiError, AppState, EntityPrefix};
use sqlx::SqlitePool;

async fn active_template(db: &SqlitePool, template_id: &str) -> Result<PortfolioTemplate, ApiError> {
    sqlx::query_as::<_, PortfolioTemplate>(
        "SELECT * FROM portfolio_templates WHERE id = ? AND is_active = 1",
    )
    .bind(template_id)
    .fetch_optional(db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))
}

async fn owned_portfolio(db: &SqlitePool, id: &str, user_id: &str) -> Result<Portfolio, ApiError> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, portfolio_id = %id, "Database error fetching portfolio");
            ApiError::DatabaseError(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_string()))
}

/// GET /api/portfolio/templates
pub async fn list_templates(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let templates = sqlx::query_as::<_, PortfolioTemplate>(
        "SELECT * FROM portfolio_templates WHERE is_active = 1 ORDER BY created_at ASC, name ASC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(templates.into_iter().map(TemplateResponse::from).collect()))
}

/// POST /api/portfolio/generate
pub async fn generate_portfolio(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Json(mut request): Json<GeneratePortfolioRequest>,
) -> Result<Json<GeneratePortfolioResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let template = active_template(&state.db, &request.template_id).await?;

    let data = request.resume_data();
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_title(&data));

    let html = render_portfolio(&template, &data);
    let portfolio_id = generate_id(EntityPrefix::Portfolio);
    let share_token = Uuid::new_v4().to_string();
    let now = now_timestamp();

    sqlx::query(
        r#"INSERT INTO portfolios
           (id, user_id, template_id, title, data, generated_html, share_token, is_public, views, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)"#,
    )
    .bind(&portfolio_id)
    .bind(&user.id)
    .bind(&template.id)
    .bind(&title)
    .bind(to_json_column(&data))
    .bind(&html)
    .bind(&share_token)
    .bind(i64::from(request.is_public.unwrap_or(true)))
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error saving portfolio");
        ApiError::DatabaseError(e)
    })?;

    info!(portfolio_id = %portfolio_id, template = %template.name, user_id = %user.id, "Portfolio generated");
    Ok(Json(GeneratePortfolioResponse {
        live_url: live_url(&share_token),
        portfolio_id,
        share_token,
        html,
    }))
}

/// GET /api/portfolio/my-portfolios
pub async fn my_portfolios(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
) -> Result<Json<Vec<PortfolioResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let portfolios = sqlx::query_as::<_, Portfolio>(
        "SELECT * FROM portfolios WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(&user.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(portfolios.into_iter().map(PortfolioResponse::from).collect()))
}

/// GET /api/portfolio/:id
pub async fn get_portfolio(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let portfolio = owned_portfolio(&state.db, &id, &user.id).await?;
    Ok(Json(PortfolioResponse::with_html(portfolio)))
}

/// PUT /api/portfolio/:id - re-renders with the current template and data
pub async fn update_portfolio(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    Json(update): Json<UpdatePortfolioRequest>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let existing = owned_portfolio(&state.db, &id, &user.id).await?;

    let template_id = update.template_id.unwrap_or_else(|| existing.template_id.clone());
    let template = active_template(&state.db, &template_id).await?;
    let data = update.resume_data.unwrap_or_else(|| existing.resume_data());
    let title = update
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(existing.title);
    let is_public = update
        .is_public
        .map(i64::from)
        .unwrap_or(existing.is_public);
    let html = render_portfolio(&template, &data);

    sqlx::query(
        r#"UPDATE portfolios
           SET template_id = ?, title = ?, data = ?, generated_html = ?, is_public = ?, updated_at = ?
           WHERE id = ? AND user_id = ?"#,
    )
    .bind(&template.id)
    .bind(&title)
    .bind(to_json_column(&data))
    .bind(&html)
    .bind(is_public)
    .bind(now_timestamp())
    .bind(&id)
    .bind(&user.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(portfolio_id = %id, "Portfolio updated");
    let updated = owned_portfolio(&state.db, &id, &user.id).await?;
    Ok(Json(PortfolioResponse::with_html(updated)))
}

/// DELETE /api/portfolio/:id
pub async fn delete_portfolio(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM portfolios WHERE id = ? AND user_id = ?")
        .bind(&id)
        .bind(&user.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Portfolio not found".to_string()));
    }

    info!(portfolio_id = %id, "Portfolio deleted");
    Ok(Json(json!({ "message": "Portfolio deleted successfully" })))
}

/// GET /api/portfolio/view/:share_token - public HTML page
pub async fn view_portfolio(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(share_token): Path<String>,
) -> (StatusCode, Html<String>) {
    let state = state_lock.read().await.clone();

    let found = sqlx::query_scalar::<_, String>(
        "UPDATE portfolios SET views = views + 1 WHERE share_token = ? AND is_public = 1 RETURNING generated_html",
    )
    .bind(&share_token)
    .fetch_optional(&state.db)
    .await;

    match found {
        Ok(Some(html)) => (StatusCode::OK, Html(html)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Html("<h1>Portfolio not found</h1>".to_string()),
        ),
        Err(e) => {
            error!(error = %e, "Database error serving portfolio");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Error loading portfolio</h1>".to_string()),
            )
        }
    }
}
