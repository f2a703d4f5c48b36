// src/interactions/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::ApiError;

/// Content a user can interact with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Job,
    Internship,
    Article,
    Roadmap,
    DsaProblem,
}

impl ContentKind {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "job" => Ok(ContentKind::Job),
            "internship" => Ok(ContentKind::Internship),
            "article" => Ok(ContentKind::Article),
            "roadmap" => Ok(ContentKind::Roadmap),
            "dsa_problem" | "dsa" => Ok(ContentKind::DsaProblem),
            other => Err(ApiError::BadRequest(format!("Unsupported content type: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Job => "job",
            ContentKind::Internship => "internship",
            ContentKind::Article => "article",
            ContentKind::Roadmap => "roadmap",
            ContentKind::DsaProblem => "dsa_problem",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            ContentKind::Job => "jobs",
            ContentKind::Internship => "internships",
            ContentKind::Article => "articles",
            ContentKind::Roadmap => "roadmaps",
            ContentKind::DsaProblem => "dsa_problems",
        }
    }

    /// Site path of the content's public page
    pub fn share_path(&self, content_id: &str) -> String {
        match self {
            ContentKind::Job => format!("jobs/{}", content_id),
            ContentKind::Internship => format!("internships/{}", content_id),
            ContentKind::Article => format!("articles/{}", content_id),
            ContentKind::Roadmap => format!("roadmaps/{}", content_id),
            ContentKind::DsaProblem => format!("dsa-corner/problem/{}", content_id),
        }
    }

    pub fn accepts_applications(&self) -> bool {
        matches!(self, ContentKind::Job | ContentKind::Internship)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Save,
    Apply,
    Share,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Like => "like",
            InteractionKind::Save => "save",
            InteractionKind::Apply => "apply",
            InteractionKind::Share => "share",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub total_likes: i64,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub share_url: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub applied: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SavedQuery {
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct SavedItem {
    pub content_type: String,
    pub content_id: String,
    pub saved_at: String,
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Default, PartialEq)]
pub struct InteractionStatus {
    pub liked: bool,
    pub saved: bool,
    pub applied: bool,
    pub shared: bool,
    pub total_likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_parsing_and_share_paths() {
        assert_eq!(ContentKind::parse("dsa").unwrap(), ContentKind::DsaProblem);
        assert_eq!(
            ContentKind::DsaProblem.share_path("P_ABC123"),
            "dsa-corner/problem/P_ABC123"
        );
        assert!(ContentKind::parse("video").is_err());
        assert!(ContentKind::Internship.accepts_applications());
        assert!(!ContentKind::Article.accepts_applications());
    }
}
