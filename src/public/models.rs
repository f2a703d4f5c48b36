// src/public/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const SEARCH_KINDS: [&str; 4] = ["jobs", "internships", "articles", "roadmaps"];

pub const COMMUNITY_MEMBERS: i64 = 46229;
pub const MONTHLY_READERS: i64 = 623117;

#[derive(Debug, Serialize)]
pub struct PublicStats {
    pub total_jobs: i64,
    pub total_internships: i64,
    pub total_articles: i64,
    pub total_roadmaps: i64,
    pub community_members: i64,
    pub monthly_readers: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub content_type: Option<String>,
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 50)
    }

    /// Whether results of `kind` were asked for
    pub fn wants(&self, kind: &str) -> bool {
        self.content_type.as_deref().map_or(true, |t| t == kind)
    }
}

#[derive(Debug, Serialize, FromRow)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RoadmapSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub difficulty_level: String,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchResults {
    pub jobs: Vec<ListingSummary>,
    pub internships: Vec<ListingSummary>,
    pub articles: Vec<ArticleSummary>,
    pub roadmaps: Vec<RoadmapSummary>,
}
