// src/resume/handlers.rs

use axum::{
    extract::{Extension, Multipart},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::analysis::{analyze_resume, parse_resume};
use super::models::{AnalyzeTextRequest, AtsAnalysis, ParseTextRequest, ParsedResume};
use super::text::extract_text;
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState};

/// A resume upload with its optional form fields
struct ResumeUpload {
    text: String,
    job_description: Option<String>,
    target_role: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, ApiError> {
    let mut text = None;
    let mut job_description = None;
    let mut target_role = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "Malformed multipart body");
        ApiError::BadRequest(format!("Invalid upload: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "resume_file" => {
                let filename = field.file_name().unwrap_or("resume.txt").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                text = Some(extract_text(&filename, &bytes)?);
            }
            "job_description" | "target_role" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read form field: {}", e)))?;
                let value = Some(value).filter(|v| !v.trim().is_empty());
                if name == "job_description" {
                    job_description = value;
                } else {
                    target_role = value;
                }
            }
            _ => {}
        }
    }

    let text = text.ok_or_else(|| ApiError::BadRequest("Resume file is required".to_string()))?;
    Ok(ResumeUpload {
        text,
        job_description,
        target_role,
    })
}

/// POST /api/resume/upload-analyze
pub async fn upload_and_analyze(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    multipart: Multipart,
) -> Result<Json<AtsAnalysis>, ApiError> {
    let upload = read_upload(multipart).await?;
    let state = state_lock.read().await.clone();

    let analysis = analyze_resume(
        &state.llm_service,
        &upload.text,
        upload.job_description.as_deref(),
        upload.target_role.as_deref(),
    )
    .await?;

    info!(user = %safe_email_log(&user.email), "Uploaded resume analyzed");
    Ok(Json(analysis))
}

/// POST /api/resume/upload-parse
pub async fn upload_and_parse(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, ApiError> {
    let upload = read_upload(multipart).await?;
    let state = state_lock.read().await.clone();

    let parsed = parse_resume(&state.llm_service, &upload.text).await?;
    info!(user = %safe_email_log(&user.email), "Uploaded resume parsed");
    Ok(Json(parsed))
}

/// POST /api/resume/analyze-text
pub async fn analyze_text(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
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

    info!(user = %safe_email_log(&user.email), "Resume text analyzed");
    Ok(Json(analysis))
}

/// POST /api/resume/parse
pub async fn parse_text(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AuthedUser(user): AuthedUser,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ParsedResume>, ApiError> {
    let state = state_lock.read().await.clone();

    let parsed = parse_resume(&state.llm_service, &request.resume_text).await?;
    info!(user = %safe_email_log(&user.email), "Resume text parsed");
    Ok(Json(parsed))
}
