// src/companies/services.rs
//! Companies have no table of their own: every view here is aggregated from
//! published jobs and internships, matching names case-insensitively.

use sqlx::SqlitePool;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, error};

use super::models::*;
use crate::common::helpers::parse_json_list;
use crate::common::ApiError;
use crate::internships::{Internship, InternshipResponse};
use crate::jobs::{Job, JobResponse};

const PROFILE_RECENT_LIMIT: i64 = 5;
const TOP_INDUSTRIES: usize = 20;

pub struct CompaniesService {
    db: SqlitePool,
}

impl CompaniesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn published_listings(&self) -> Result<Vec<ListingRow>, ApiError> {
        sqlx::query_as::<_, ListingRow>(
            r#"SELECT 'job' AS kind, company, company_logo, location, tags, created_at
               FROM jobs WHERE status = 'published'
               UNION ALL
               SELECT 'internship' AS kind, company, company_logo, location, tags, created_at
               FROM internships WHERE status = 'published'"#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error loading listings for companies");
            ApiError::DatabaseError(e)
        })
    }

    pub async fn search(&self, query: &CompanySearchQuery) -> Result<CompanySearchResponse, ApiError> {
        let needle = |v: &Option<String>| {
            v.as_deref()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
        };
        let q = needle(&query.q);
        let industry = needle(&query.industry);
        let location = needle(&query.location);

        let companies: Vec<CompanySummary> = aggregate(self.published_listings().await?)
            .into_iter()
            .filter(|c| q.as_ref().map_or(true, |q| c.name.to_lowercase().contains(q)))
            .filter(|c| {
                industry
                    .as_ref()
                    .map_or(true, |i| c.industries.iter().any(|t| t.to_lowercase() == *i))
            })
            .filter(|c| {
                location
                    .as_ref()
                    .map_or(true, |l| c.locations.iter().any(|loc| loc.to_lowercase().contains(l)))
            })
            .collect();

        let total = companies.len();
        let companies = companies.into_iter().take(query.limit()).collect();
        debug!(total, "Company search completed");
        Ok(CompanySearchResponse { companies, total })
    }

    pub async fn profile(&self, name: &str) -> Result<CompanyProfile, ApiError> {
        let wanted = name.trim().to_lowercase();
        let company = aggregate(self.published_listings().await?)
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

        let (recent_jobs, _) = self.jobs(name, 0, PROFILE_RECENT_LIMIT).await?;
        let (recent_internships, _) = self.internships(name, 0, PROFILE_RECENT_LIMIT).await?;

        Ok(CompanyProfile {
            company,
            recent_jobs,
            recent_internships,
        })
    }

    /// Published jobs of one company, newest first, with the total count
    pub async fn jobs(&self, name: &str, offset: i64, limit: i64) -> Result<(Vec<JobResponse>, i64), ApiError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM jobs WHERE status = 'published' AND LOWER(company) = LOWER(?)",
        )
        .bind(name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let jobs = sqlx::query_as::<_, Job>(
            r#"SELECT * FROM jobs
               WHERE status = 'published' AND LOWER(company) = LOWER(?)
               ORDER BY created_at DESC LIMIT ? OFFSET ?"#,
        )
        .bind(name.trim())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, company = %name, "Database error listing company jobs");
            ApiError::DatabaseError(e)
        })?;

        Ok((jobs.into_iter().map(JobResponse::from).collect(), total))
    }

    pub async fn internships(
        &self,
        name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<InternshipResponse>, i64), ApiError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM internships WHERE status = 'published' AND LOWER(company) = LOWER(?)",
        )
        .bind(name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let internships = sqlx::query_as::<_, Internship>(
            r#"SELECT * FROM internships
               WHERE status = 'published' AND LOWER(company) = LOWER(?)
               ORDER BY created_at DESC LIMIT ? OFFSET ?"#,
        )
        .bind(name.trim())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, company = %name, "Database error listing company internships");
            ApiError::DatabaseError(e)
        })?;

        Ok((internships.into_iter().map(InternshipResponse::from).collect(), total))
    }

    pub async fn industry_stats(&self) -> Result<Vec<IndustryCount>, ApiError> {
        Ok(industry_counts(&self.published_listings().await?))
    }
}

/// Groups listings by case-insensitive company name. The first spelling seen
/// for the newest listing wins; busiest companies come first.
pub fn aggregate(mut rows: Vec<ListingRow>) -> Vec<CompanySummary> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    struct Acc {
        summary: CompanySummary,
        locations: BTreeSet<String>,
        industries: BTreeSet<String>,
    }

    let mut by_name: BTreeMap<String, Acc> = BTreeMap::new();
    for row in rows {
        let key = row.company.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let acc = by_name.entry(key).or_insert_with(|| Acc {
            summary: CompanySummary {
                name: row.company.trim().to_string(),
                logo: None,
                job_count: 0,
                internship_count: 0,
                locations: Vec::new(),
                industries: Vec::new(),
                latest_posting: row.created_at.clone(),
            },
            locations: BTreeSet::new(),
            industries: BTreeSet::new(),
        });

        if acc.summary.logo.is_none() {
            acc.summary.logo = row.company_logo.filter(|l| !l.trim().is_empty());
        }
        if row.kind == "job" {
            acc.summary.job_count += 1;
        } else {
            acc.summary.internship_count += 1;
        }
        if !row.location.trim().is_empty() {
            acc.locations.insert(row.location.trim().to_string());
        }
        for tag in parse_json_list::<String>(row.tags.as_deref()) {
            acc.industries.insert(tag);
        }
    }

    let mut companies: Vec<CompanySummary> = by_name
        .into_values()
        .map(|acc| CompanySummary {
            locations: acc.locations.into_iter().collect(),
            industries: acc.industries.into_iter().collect(),
            ..acc.summary
        })
        .collect();

    companies.sort_by(|a, b| {
        (b.job_count + b.internship_count)
            .cmp(&(a.job_count + a.internship_count))
            .then_with(|| a.name.cmp(&b.name))
    });
    companies
}

/// Listing tags ranked by how many listings carry them
pub fn industry_counts(rows: &[ListingRow]) -> Vec<IndustryCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for row in rows {
        let tags: BTreeSet<String> = parse_json_list::<String>(row.tags.as_deref())
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        for tag in tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut industries: Vec<IndustryCount> = counts
        .into_iter()
        .map(|(industry, count)| IndustryCount { industry, count })
        .collect();
    industries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.industry.cmp(&b.industry)));
    industries.truncate(TOP_INDUSTRIES);
    industries
}
