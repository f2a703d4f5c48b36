// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::parse_json_list;

pub const JOB_TYPES: [&str; 4] = ["full-time", "part-time", "contract", "internship"];
pub const EXPERIENCE_LEVELS: [&str; 3] = ["fresher", "experienced", "senior"];

// ============================================================================
// Job Models
// ============================================================================

#[derive(FromRow, Debug, Clone)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    pub requirements: Option<String>, // JSON list
    pub responsibilities: Option<String>, // JSON list
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub job_type: String,
    pub experience_level: String,
    pub skills_required: Option<String>, // JSON list
    pub benefits: Option<String>, // JSON list
    pub application_url: Option<String>,
    pub application_deadline: Option<String>,
    pub is_remote: i64, // 0 or 1 in SQLite
    pub tags: Option<String>, // JSON list
    pub status: String,
    pub archived_reason: Option<String>,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub applications: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

// Job response with parsed lists
#[derive(Serialize, Debug)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub job_type: String,
    pub experience_level: String,
    pub skills_required: Vec<String>,
    pub benefits: Vec<String>,
    pub application_url: Option<String>,
    pub application_deadline: Option<String>,
    pub is_remote: bool,
    pub tags: Vec<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_reason: Option<String>,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub applications: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            requirements: parse_json_list(job.requirements.as_deref()),
            responsibilities: parse_json_list(job.responsibilities.as_deref()),
            skills_required: parse_json_list(job.skills_required.as_deref()),
            benefits: parse_json_list(job.benefits.as_deref()),
            tags: parse_json_list(job.tags.as_deref()),
            is_remote: job.is_remote == 1,
            id: job.id,
            title: job.title,
            company: job.company,
            company_logo: job.company_logo,
            description: job.description,
            location: job.location,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            salary_currency: job.salary_currency,
            job_type: job.job_type,
            experience_level: job.experience_level,
            application_url: job.application_url,
            application_deadline: job.application_deadline,
            status: job.status,
            archived_reason: job.archived_reason,
            expiration_date: job.expiration_date,
            views: job.views,
            applications: job.applications,
            created_by: job.created_by,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateJob {
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub job_type: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default, alias = "skills")]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub application_url: Option<String>,
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_logo: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    #[serde(alias = "skills")]
    pub skills_required: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub application_url: Option<String>,
    pub application_deadline: Option<String>,
    pub is_remote: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

// ============================================================================
// Public Query Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PublicJobQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub is_remote: Option<bool>,
    pub skills: Option<String>,
}

impl PublicJobQuery {
    /// (offset, limit) with limit clamped to 1..=50, default 20
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 50),
        )
    }
}
