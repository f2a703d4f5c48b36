// src/companies/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::internships::InternshipResponse;
use crate::jobs::JobResponse;

/// One published job or internship, as seen by the company aggregation
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub kind: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub tags: Option<String>,
    pub created_at: String,
}

/// A company derived from the listings that name it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanySummary {
    pub name: String,
    pub logo: Option<String>,
    pub job_count: i64,
    pub internship_count: i64,
    pub locations: Vec<String>,
    pub industries: Vec<String>,
    pub latest_posting: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct CompanySearchQuery {
    pub q: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub limit: Option<i64>,
}

impl CompanySearchQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(20).clamp(1, 100) as usize
    }
}

#[derive(Debug, Serialize)]
pub struct CompanySearchResponse {
    pub companies: Vec<CompanySummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CompanyProfile {
    pub company: CompanySummary,
    pub recent_jobs: Vec<JobResponse>,
    pub recent_internships: Vec<InternshipResponse>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CompanyListingsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl CompanyListingsQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 50),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyJobsPage {
    pub jobs: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CompanyInternshipsPage {
    pub internships: Vec<InternshipResponse>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct IndustryCount {
    pub industry: String,
    pub count: i64,
}
