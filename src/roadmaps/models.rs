// src/roadmaps/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::parse_json_list;
use crate::common::{generate_id, EntityPrefix};

pub const DIFFICULTY_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// One step of a roadmap, stored inside the `steps` JSON column
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RoadmapStep {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub estimated_duration: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub order: i64,
}

/// Fills missing step ids and sorts steps by `order`
pub fn prepare_steps(mut steps: Vec<RoadmapStep>) -> Vec<RoadmapStep> {
    for step in steps.iter_mut() {
        if step.id.trim().is_empty() {
            step.id = generate_id(EntityPrefix::RoadmapStep);
        }
    }
    steps.sort_by_key(|s| s.order);
    steps
}

#[derive(FromRow, Debug, Clone)]
pub struct Roadmap {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub featured_image: Option<String>,
    pub difficulty_level: String,
    pub estimated_completion_time: Option<String>,
    pub tags: Option<String>,
    pub steps: Option<String>,
    pub prerequisites: Option<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub enrollments: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Debug)]
pub struct RoadmapResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub featured_image: Option<String>,
    pub difficulty_level: String,
    pub estimated_completion_time: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<RoadmapStep>,
    pub prerequisites: Vec<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub views: i64,
    pub enrollments: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Roadmap> for RoadmapResponse {
    fn from(r: Roadmap) -> Self {
        RoadmapResponse {
            tags: parse_json_list(r.tags.as_deref()),
            steps: parse_json_list(r.steps.as_deref()),
            prerequisites: parse_json_list(r.prerequisites.as_deref()),
            id: r.id,
            title: r.title,
            slug: r.slug,
            description: r.description,
            featured_image: r.featured_image,
            difficulty_level: r.difficulty_level,
            estimated_completion_time: r.estimated_completion_time,
            status: r.status,
            expiration_date: r.expiration_date,
            views: r.views,
            enrollments: r.enrollments,
            created_by: r.created_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateRoadmap {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub featured_image: Option<String>,
    pub difficulty_level: String,
    pub estimated_completion_time: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateRoadmap {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub difficulty_level: Option<String>,
    pub estimated_completion_time: Option<String>,
    pub tags: Option<Vec<String>>,
    pub steps: Option<Vec<RoadmapStep>>,
    pub prerequisites: Option<Vec<String>>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublicRoadmapQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    #[serde(alias = "difficulty")]
    pub difficulty_level: Option<String>,
    pub tags: Option<String>,
}

impl PublicRoadmapQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 50),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_steps_assigns_ids_and_orders() {
        let steps = vec![
            RoadmapStep {
                title: "Ownership".to_string(),
                order: 2,
                ..Default::default()
            },
            RoadmapStep {
                id: "keep".to_string(),
                title: "Install Rust".to_string(),
                order: 1,
                ..Default::default()
            },
        ];

        let prepared = prepare_steps(steps);
        assert_eq!(prepared[0].id, "keep");
        assert!(prepared[1].id.starts_with("S_"));
        assert_eq!(prepared[1].title, "Ownership");
    }
}
