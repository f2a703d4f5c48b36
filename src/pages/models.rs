// src/pages/models.rs

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub meta_description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing entry, without the HTML body
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
}

/// A page seeded at startup
pub struct DefaultPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub meta_description: &'static str,
    pub content: &'static str,
}
