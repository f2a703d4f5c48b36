// src/roadmaps/validators.rs

use super::models::*;
use crate::common::query::CONTENT_STATUSES;
use crate::common::{ValidationResult, Validator};

pub struct RoadmapValidator;

fn check_steps(result: &mut ValidationResult, steps: &[RoadmapStep]) {
    for (index, step) in steps.iter().enumerate() {
        if step.title.trim().is_empty() {
            result.add_error(&format!("steps[{}].title", index), "Step title is required");
        }
    }
}

impl Validator<CreateRoadmap> for RoadmapValidator {
    fn validate(&self, data: &CreateRoadmap) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_text("title", "Title", &data.title, 255);
        result.require_text("description", "Description", &data.description, 20000);
        result.check_slug(data.slug.as_deref());
        result.check_one_of(
            "difficulty_level",
            Some(data.difficulty_level.as_str()),
            &DIFFICULTY_LEVELS,
        );
        check_steps(&mut result, &data.steps);
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

impl Validator<UpdateRoadmap> for RoadmapValidator {
    fn validate(&self, data: &UpdateRoadmap) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require_text("title", "Title", title, 255);
        }
        if let Some(description) = &data.description {
            result.require_text("description", "Description", description, 20000);
        }
        result.check_slug(data.slug.as_deref());
        result.check_one_of(
            "difficulty_level",
            data.difficulty_level.as_deref(),
            &DIFFICULTY_LEVELS,
        );
        if let Some(steps) = &data.steps {
            check_steps(&mut result, steps);
        }
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}
