// src/jobs/validators.rs

use super::models::*;
use crate::common::query::CONTENT_STATUSES;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Job Validators
// ============================================================================

pub struct JobValidator;

impl Validator<CreateJob> for JobValidator {
    fn validate(&self, data: &CreateJob) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_text("title", "Job title", &data.title, 255);
        result.require_text("company", "Company name", &data.company, 255);
        result.require_text("description", "Description", &data.description, 10000);
        result.require_text("location", "Location", &data.location, 255);

        result.check_range("salary_range", data.salary_min, data.salary_max);
        result.check_one_of("job_type", Some(data.job_type.as_str()), &JOB_TYPES);
        result.check_one_of(
            "experience_level",
            Some(data.experience_level.as_str()),
            &EXPERIENCE_LEVELS,
        );
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("application_deadline", data.application_deadline.as_deref());
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

impl Validator<UpdateJob> for JobValidator {
    fn validate(&self, data: &UpdateJob) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Present fields must still be non-empty
        if let Some(title) = &data.title {
            result.require_text("title", "Job title", title, 255);
        }
        if let Some(company) = &data.company {
            result.require_text("company", "Company name", company, 255);
        }
        if let Some(description) = &data.description {
            result.require_text("description", "Description", description, 10000);
        }
        if let Some(location) = &data.location {
            result.require_text("location", "Location", location, 255);
        }

        result.check_range("salary_range", data.salary_min, data.salary_max);
        result.check_one_of("job_type", data.job_type.as_deref(), &JOB_TYPES);
        result.check_one_of(
            "experience_level",
            data.experience_level.as_deref(),
            &EXPERIENCE_LEVELS,
        );
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("application_deadline", data.application_deadline.as_deref());
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}
