// src/ai/models.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::ApiError;

/// Kinds of admin content the generator can draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    Job,
    Internship,
    Article,
    Roadmap,
    DsaProblem,
}

impl GeneratedKind {
    pub const ALL: [GeneratedKind; 5] = [
        GeneratedKind::Job,
        GeneratedKind::Internship,
        GeneratedKind::Article,
        GeneratedKind::Roadmap,
        GeneratedKind::DsaProblem,
    ];

    /// Accepts `dsa-problem` and `dsa_problem` alike
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let wanted = raw.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                ApiError::BadRequest(format!("Unsupported content type: {}", raw.trim().to_lowercase()))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedKind::Job => "job",
            GeneratedKind::Internship => "internship",
            GeneratedKind::Article => "article",
            GeneratedKind::Roadmap => "roadmap",
            GeneratedKind::DsaProblem => "dsa-problem",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeneratedKind::Job => "Job",
            GeneratedKind::Internship => "Internship",
            GeneratedKind::Article => "Article",
            GeneratedKind::Roadmap => "Roadmap",
            GeneratedKind::DsaProblem => "DSA problem",
        }
    }

    /// Keys every draft of this kind carries
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            GeneratedKind::Job => &[
                "title",
                "company",
                "description",
                "requirements",
                "responsibilities",
                "location",
                "salary_min",
                "salary_max",
                "skills_required",
                "benefits",
                "tags",
                "job_type",
                "experience_level",
            ],
            GeneratedKind::Internship => &[
                "title",
                "company",
                "description",
                "requirements",
                "responsibilities",
                "location",
                "stipend",
                "duration_months",
                "skills_required",
                "benefits",
                "tags",
            ],
            GeneratedKind::Article => &[
                "title",
                "slug",
                "excerpt",
                "content",
                "category",
                "tags",
                "reading_time_minutes",
                "seo_meta_title",
                "seo_meta_description",
            ],
            GeneratedKind::Roadmap => &[
                "title",
                "slug",
                "description",
                "difficulty_level",
                "estimated_completion_time",
                "prerequisites",
                "steps",
                "tags",
            ],
            GeneratedKind::DsaProblem => &[
                "title",
                "slug",
                "description",
                "difficulty",
                "tags",
                "examples",
                "constraints",
                "hints",
                "test_cases",
                "solution_approach",
                "time_complexity",
                "space_complexity",
            ],
        }
    }

    /// Days until a fallback or agent draft expires
    pub fn expiration_days(&self) -> i64 {
        match self {
            GeneratedKind::Job => 30,
            GeneratedKind::Internship => 60,
            GeneratedKind::Article | GeneratedKind::Roadmap | GeneratedKind::DsaProblem => 90,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateAllQuery {
    pub content_type: String,
    pub prompt: String,
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub content_type: String,
    pub prompt: String,
    pub additional_context: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AgentRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub content: Value,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedContent {
    pub content: Value,
    pub generated_at: String,
}
