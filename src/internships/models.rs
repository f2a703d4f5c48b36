// src/internships/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::{parse_duration_months, parse_json_list};

pub const DEFAULT_DURATION_MONTHS: i64 = 3;

#[derive(FromRow, Debug, Clone)]
pub struct Internship {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub location: String,
    pub stipend: Option<i64>,
    pub duration_months: i64,
    pub skills_required: Option<String>,
    pub benefits: Option<String>,
    pub application_url: Option<String>,
    pub application_deadline: Option<String>,
    pub is_remote: i64,
    pub tags: Option<String>,
    pub status: String,
    pub archived_reason: Option<String>,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub applications: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Debug)]
pub struct InternshipResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub location: String,
    pub stipend: Option<i64>,
    pub duration_months: i64,
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

impl From<Internship> for InternshipResponse {
    fn from(i: Internship) -> Self {
        InternshipResponse {
            requirements: parse_json_list(i.requirements.as_deref()),
            responsibilities: parse_json_list(i.responsibilities.as_deref()),
            skills_required: parse_json_list(i.skills_required.as_deref()),
            benefits: parse_json_list(i.benefits.as_deref()),
            tags: parse_json_list(i.tags.as_deref()),
            is_remote: i.is_remote == 1,
            id: i.id,
            title: i.title,
            company: i.company,
            company_logo: i.company_logo,
            description: i.description,
            location: i.location,
            stipend: i.stipend,
            duration_months: i.duration_months,
            application_url: i.application_url,
            application_deadline: i.application_deadline,
            status: i.status,
            archived_reason: i.archived_reason,
            expiration_date: i.expiration_date,
            views: i.views,
            applications: i.applications,
            created_by: i.created_by,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateInternship {
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub location: String,
    pub stipend: Option<i64>,
    pub duration_months: Option<i64>,
    /// Free-form duration such as "6 months", used when `duration_months` is absent
    pub duration: Option<String>,
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

impl CreateInternship {
    pub fn resolved_duration_months(&self) -> i64 {
        match (self.duration_months, self.duration.as_deref()) {
            (Some(months), _) => months,
            (None, Some(duration)) => parse_duration_months(duration),
            (None, None) => DEFAULT_DURATION_MONTHS,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateInternship {
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_logo: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub location: Option<String>,
    pub stipend: Option<i64>,
    pub duration_months: Option<i64>,
    pub duration: Option<String>,
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

impl UpdateInternship {
    pub fn resolved_duration_months(&self) -> Option<i64> {
        self.duration_months
            .or_else(|| self.duration.as_deref().map(parse_duration_months))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PublicInternshipQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub duration: Option<i64>,
    pub is_remote: Option<bool>,
    pub skills: Option<String>,
}

impl PublicInternshipQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 50),
        )
    }
}
