// src/admin/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

// Dashboard models
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_jobs: i64,
    pub total_internships: i64,
    pub total_articles: i64,
    pub total_roadmaps: i64,
    pub total_dsa_problems: i64,
    pub total_users: i64,
    pub total_views: i64,
    pub total_applications: i64,
    pub recent_activity: Vec<ActivityItem>,
    pub popular_content: Vec<PopularItem>,
}

/// Recently created job or article
#[derive(Debug, Serialize, FromRow)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PopularItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    pub title: String,
    pub views: i64,
    pub applications: i64,
}

// Settings models
#[derive(Debug, Deserialize)]
pub struct SettingUpdate {
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub settings: HashMap<String, SettingUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct TestConnectionRequest {
    /// "llm" or "google"
    pub service: String,
}
