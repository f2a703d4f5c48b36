// src/articles/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::parse_json_list;

#[derive(FromRow, Debug, Clone)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub category: String,
    pub tags: Option<String>,
    pub reading_time_minutes: Option<i64>,
    pub seo_meta_title: Option<String>,
    pub seo_meta_description: Option<String>,
    pub author: Option<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Debug)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<i64>,
    pub seo_meta_title: Option<String>,
    pub seo_meta_description: Option<String>,
    pub author: Option<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        ArticleResponse {
            tags: parse_json_list(a.tags.as_deref()),
            id: a.id,
            title: a.title,
            slug: a.slug,
            excerpt: a.excerpt,
            content: a.content,
            featured_image: a.featured_image,
            category: a.category,
            reading_time_minutes: a.reading_time_minutes,
            seo_meta_title: a.seo_meta_title,
            seo_meta_description: a.seo_meta_description,
            author: a.author,
            status: a.status,
            expiration_date: a.expiration_date,
            views: a.views,
            likes: a.likes,
            created_by: a.created_by,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateArticle {
    pub title: String,
    /// Derived from the title when omitted
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<i64>,
    pub seo_meta_title: Option<String>,
    pub seo_meta_description: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub reading_time_minutes: Option<i64>,
    pub seo_meta_title: Option<String>,
    pub seo_meta_description: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublicArticleQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
}

impl PublicArticleQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 50),
        )
    }
}
