// src/ai/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::generator::ContentGenerator;
use super::models::*;
use crate::auth::AuthedAdmin;
use crate::common::{now_timestamp, ApiError, AppState};
use crate::resume::analysis::analyze_resume;
use crate::resume::{AnalyzeTextRequest, AtsAnalysis};

const MAX_VARIATIONS: i64 = 10;

async fn generate_kind(
    state_lock: &Arc<RwLock<AppState>>,
    admin: &str,
    kind: GeneratedKind,
    prompt: &str,
) -> Result<Json<GenerationResponse>, ApiError> {
    if prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }
    let state = state_lock.read().await.clone();

    let content = ContentGenerator::new(&state.llm_service)
        .generate(kind, prompt, None)
        .await
        .map_err(|e| {
            error!(error = %e, kind = kind.as_str(), "Content generation failed");
            ApiError::from(e)
        })?;

    info!(admin = %admin, kind = kind.as_str(), "Content generated");
    Ok(Json(GenerationResponse {
        success: true,
        content,
        message: format!("{} content generated successfully", kind.label()),
    }))
}

/// POST /api/ai/generate-job
pub async fn generate_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<PromptQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate_kind(&state_lock, &admin.username, GeneratedKind::Job, &query.prompt).await
}

/// POST /api/ai/generate-internship
pub async fn generate_internship(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<PromptQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate_kind(&state_lock, &admin.username, GeneratedKind::Internship, &query.prompt).await
}

/// POST /api/ai/generate-article
pub async fn generate_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<PromptQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate_kind(&state_lock, &admin.username, GeneratedKind::Article, &query.prompt).await
}

/// POST /api/ai/generate-roadmap
pub async fn generate_roadmap(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<PromptQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate_kind(&state_lock, &admin.username, GeneratedKind::Roadmap, &query.prompt).await
}

/// POST /api/ai/generate-dsa-problem
pub async fn generate_dsa_problem(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<PromptQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    generate_kind(&state_lock, &admin.username, GeneratedKind::DsaProblem, &query.prompt).await
}

/// POST /api/ai/generate-all - `count` variations of one kind
pub async fn generate_all(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Query(query): Query<GenerateAllQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let kind = GeneratedKind::parse(&query.content_type)?;
    let count = query.count.unwrap_or(1);
    if !(1..=MAX_VARIATIONS).contains(&count) {
        return Err(ApiError::ValidationError(format!(
            "count: must be between 1 and {}",
            MAX_VARIATIONS
        )));
    }
    if query.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    let state = state_lock.read().await.clone();
    let generator = ContentGenerator::new(&state.llm_service);

    let mut drafts = Vec::with_capacity(count as usize);
    for i in 1..=count {
        let prompt = format!("{} (variation {})", query.prompt.trim(), i);
        drafts.push(generator.generate(kind, &prompt, None).await?);
    }

    info!(admin = %admin.username, kind = kind.as_str(), count, "Content variations generated");
    Ok(Json(GenerationResponse {
        success: true,
        content: serde_json::Value::Array(drafts),
        message: format!("Generated {} {} items successfully", count, kind.as_str()),
    }))
}

/// POST /api/ai/generate
pub async fn generate_content(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedContent>, ApiError> {
    let kind = GeneratedKind::parse(&request.content_type)?;
    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    let state = state_lock.read().await.clone();
    let content = ContentGenerator::new(&state.llm_service)
        .generate(kind, &request.prompt, request.additional_context.as_ref())
        .await?;

    info!(admin = %admin.username, kind = kind.as_str(), "Content generated");
    Ok(Json(GeneratedContent {
        content,
        generated_at: now_timestamp(),
    }))
}

/// POST /api/ai-agent/generate/:kind - falls back to a built-in draft
pub async fn agent_generate(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedAdmin(admin): AuthedAdmin,
    Path(kind): Path<String>,
    request: Option<Json<AgentRequest>>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let kind = GeneratedKind::parse(&kind)?;
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let state = state_lock.read().await.clone();
    let content = ContentGenerator::new(&state.llm_service)
        .generate_or_fallback(kind, request.prompt.as_deref())
        .await;

    info!(admin = %admin.username, kind = kind.as_str(), "Agent draft produced");
    Ok(Json(GenerationResponse {
        success: true,
        content,
        message: format!("{} content generated successfully", kind.label()),
    }))
}

/// POST /api/public-ai/analyze-resume
pub async fn public_analyze_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AtsAnalysis>, ApiError> {
    let state = state_lock.read().await.clone();
    let analysis = analyze_resume(
        &state.llm_service,
        &request.resume_text,
        request.job_description.as_deref(),
        request.target_role.as_deref(),
    )
    .await?;
    Ok(Json(analysis))
}
