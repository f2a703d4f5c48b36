// src/resume/analysis.rs

use serde_json::Value;
use tracing::{info, warn};

use super::models::{AtsAnalysis, ParsedResume, ResumeData};
use crate::common::{now_timestamp, ApiError};
use crate::services::{GenerationPurpose, LlmError, LlmService};

const DEFAULT_PARSING_CONFIDENCE: f64 = 0.8;

fn analysis_prompt(resume_text: &str, job_description: Option<&str>, target_role: Option<&str>) -> String {
    let mut prompt = format!("Analyze this resume for ATS compatibility.\n\nResume:\n{}\n", resume_text);

    if let Some(description) = job_description.filter(|d| !d.trim().is_empty()) {
        prompt.push_str(&format!("\nJob description:\n{}\n", description.trim()));
    }
    if let Some(role) = target_role.filter(|r| !r.trim().is_empty()) {
        prompt.push_str(&format!("\nTarget role: {}\n", role.trim()));
    }

    prompt.push_str(
        "\nReturn JSON with keys: overall_score (0-100), strengths, weaknesses, suggestions, \
         keyword_match_score (0-100), skills_analysis {technical_skills, soft_skills, missing_skills}, \
         experience_analysis {years_experience, project_quality, achievements}, \
         education_analysis {degree_relevance, certifications, additional_courses}, \
         formatting_score (0-100), recommendations.",
    );
    prompt
}

fn parse_prompt(resume_text: &str) -> String {
    format!(
        "Parse this resume into JSON.\n\nResume:\n{}\n\n\
         Return JSON with keys: personal_details {{full_name, email, phone, location, linkedin, \
         github, portfolio_url, bio}}, education [{{degree, institution, year, cgpa, description}}], \
         experience [{{title, company, duration, location, description[]}}], \
         projects [{{name, description, technologies[], github_url, live_url}}], skills, \
         certifications, achievements, parsing_confidence (0-1), suggestions, missing_sections.",
        resume_text
    )
}

/// Scores a resume; `analyzed_at` is always set here
pub async fn analyze_resume(
    llm: &LlmService,
    resume_text: &str,
    job_description: Option<&str>,
    target_role: Option<&str>,
) -> Result<AtsAnalysis, ApiError> {
    let resume_text = resume_text.trim();
    if resume_text.is_empty() {
        return Err(ApiError::BadRequest("Resume text is required".to_string()));
    }

    let reply = llm
        .generate_json(
            GenerationPurpose::ResumeAnalysis,
            &analysis_prompt(resume_text, job_description, target_role),
        )
        .await?;

    let analysis = analysis_from_reply(reply)?;
    info!(overall_score = analysis.overall_score, "Resume analyzed");
    Ok(analysis)
}

pub async fn parse_resume(llm: &LlmService, resume_text: &str) -> Result<ParsedResume, ApiError> {
    let resume_text = resume_text.trim();
    if resume_text.is_empty() {
        return Err(ApiError::BadRequest("Resume text is required".to_string()));
    }

    let reply = llm
        .generate_json(GenerationPurpose::ResumeParsing, &parse_prompt(resume_text))
        .await?;

    let parsed = parsed_from_reply(reply)?;
    info!(
        confidence = parsed.parsing_confidence,
        missing = parsed.missing_sections.len(),
        "Resume parsed"
    );
    Ok(parsed)
}

pub fn analysis_from_reply(reply: Value) -> Result<AtsAnalysis, ApiError> {
    let mut analysis: AtsAnalysis = serde_json::from_value(reply).map_err(|e| {
        warn!(error = %e, "Resume analysis reply did not match the expected shape");
        ApiError::from(LlmError::InvalidResponse(e.to_string()))
    })?;

    for object in [
        &mut analysis.skills_analysis,
        &mut analysis.experience_analysis,
        &mut analysis.education_analysis,
    ] {
        if !object.is_object() {
            *object = Value::Object(Default::default());
        }
    }
    analysis.analyzed_at = now_timestamp();
    Ok(analysis)
}

pub fn parsed_from_reply(reply: Value) -> Result<ParsedResume, ApiError> {
    let data: ResumeData = serde_json::from_value(reply.clone()).map_err(|e| {
        warn!(error = %e, "Resume parse reply did not match the expected shape");
        ApiError::from(LlmError::InvalidResponse(e.to_string()))
    })?;

    let parsing_confidence = reply
        .get("parsing_confidence")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_PARSING_CONFIDENCE);
    let suggestions = string_list(reply.get("suggestions"));
    let missing_sections = match reply.get("missing_sections") {
        Some(Value::Array(_)) => string_list(reply.get("missing_sections")),
        _ => missing_sections(&data),
    };

    Ok(ParsedResume {
        data,
        parsing_confidence,
        suggestions,
        missing_sections,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Names of the sections with nothing in them
pub fn missing_sections(data: &ResumeData) -> Vec<String> {
    let sections = [
        ("education", data.education.is_empty()),
        ("experience", data.experience.is_empty()),
        ("projects", data.projects.is_empty()),
        ("skills", data.skills.is_empty()),
        ("certifications", data.certifications.is_empty()),
        ("achievements", data.achievements.is_empty()),
    ];
    sections
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_defaults_missing_keys() {
        let analysis = analysis_from_reply(json!({
            "overall_score": 72.5,
            "strengths": ["Clear project descriptions"],
            "skills_analysis": "n/a"
        }))
        .unwrap();

        assert_eq!(analysis.overall_score, 72.5);
        assert_eq!(analysis.strengths.len(), 1);
        assert!(analysis.weaknesses.is_empty());
        assert_eq!(analysis.formatting_score, 0.0);
        assert!(analysis.skills_analysis.is_object());
        assert!(analysis.education_analysis.is_object());
        assert!(!analysis.analyzed_at.is_empty());
    }

    #[test]
    fn test_parse_computes_missing_sections() {
        let parsed = parsed_from_reply(json!({
            "personal_details": { "full_name": "Jane Doe", "email": "jane@example.com" },
            "skills": ["Rust", "SQL"],
            "projects": [{ "name": "talentd", "description": "Job board", "technologies": ["axum"] }]
        }))
        .unwrap();

        assert_eq!(parsed.data.personal_details.full_name, "Jane Doe");
        assert_eq!(parsed.parsing_confidence, 0.8);
        assert_eq!(
            parsed.missing_sections,
            vec!["education", "experience", "certifications", "achievements"]
        );
    }

    #[test]
    fn test_parse_keeps_model_missing_sections() {
        let parsed = parsed_from_reply(json!({
            "parsing_confidence": 0.95,
            "missing_sections": ["summary"]
        }))
        .unwrap();
        assert_eq!(parsed.parsing_confidence, 0.95);
        assert_eq!(parsed.missing_sections, vec!["summary"]);
    }

    #[test]
    fn test_prompt_includes_optional_context() {
        let prompt = analysis_prompt("Jane Doe", Some("Backend role"), Some("  "));
        assert!(prompt.contains("Job description:\nBackend role"));
        assert!(!prompt.contains("Target role"));
    }
}
