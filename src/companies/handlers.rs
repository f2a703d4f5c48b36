// src/companies/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::*;
use super::services::CompaniesService;
use crate::common::{ApiError, AppState};

fn page_of(skip: i64, limit: i64, total: i64) -> (i64, i64) {
    (skip / limit + 1, (total + limit - 1) / limit)
}

/// GET /api/companies/search
pub async fn search_companies(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(query): Query<CompanySearchQuery>,
) -> Result<Json<CompanySearchResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = CompaniesService::new(state.db).search(&query).await?;
    Ok(Json(result))
}

/// GET /api/companies/:name
pub async fn get_company_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(name): Path<String>,
) -> Result<Json<CompanyProfile>, ApiError> {
    let state = state_lock.read().await.clone();
    let profile = CompaniesService::new(state.db).profile(&name).await?;
    info!(company = %profile.company.name, "Company profile fetched");
    Ok(Json(profile))
}

/// GET /api/companies/:name/jobs
pub async fn get_company_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(name): Path<String>,
    Query(query): Query<CompanyListingsQuery>,
) -> Result<Json<CompanyJobsPage>, ApiError> {
    let state = state_lock.read().await.clone();
    let (skip, limit) = query.window();
    let (jobs, total) = CompaniesService::new(state.db).jobs(&name, skip, limit).await?;
    let (page, total_pages) = page_of(skip, limit, total);

    Ok(Json(CompanyJobsPage {
        jobs,
        total,
        page,
        total_pages,
    }))
}

/// GET /api/companies/:name/internships
pub async fn get_company_internships(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(name): Path<String>,
    Query(query): Query<CompanyListingsQuery>,
) -> Result<Json<CompanyInternshipsPage>, ApiError> {
    let state = state_lock.read().await.clone();
    let (skip, limit) = query.window();
    let (internships, total) = CompaniesService::new(state.db)
        .internships(&name, skip, limit)
        .await?;
    let (page, total_pages) = page_of(skip, limit, total);

    Ok(Json(CompanyInternshipsPage {
        internships,
        total,
        page,
        total_pages,
    }))
}

/// GET /api/companies/stats/industries
pub async fn get_industry_stats(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();
    let industries = CompaniesService::new(state.db).industry_stats().await?;
    Ok(Json(serde_json::json!({ "industries": industries })))
}
