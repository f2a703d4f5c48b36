// src/internships/validators.rs

use super::models::*;
use crate::common::query::CONTENT_STATUSES;
use crate::common::{ValidationResult, Validator};

pub struct InternshipValidator;

fn check_duration(result: &mut ValidationResult, months: Option<i64>) {
    if let Some(months) = months {
        if !(1..=24).contains(&months) {
            result.add_error("duration_months", "Duration must be between 1 and 24 months");
        }
    }
}

impl Validator<CreateInternship> for InternshipValidator {
    fn validate(&self, data: &CreateInternship) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_text("title", "Internship title", &data.title, 255);
        result.require_text("company", "Company name", &data.company, 255);
        result.require_text("description", "Description", &data.description, 10000);
        result.require_text("location", "Location", &data.location, 255);

        if data.stipend.map_or(false, |s| s < 0) {
            result.add_error("stipend", "Stipend cannot be negative");
        }
        check_duration(&mut result, Some(data.resolved_duration_months()));
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("application_deadline", data.application_deadline.as_deref());
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

impl Validator<UpdateInternship> for InternshipValidator {
    fn validate(&self, data: &UpdateInternship) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require_text("title", "Internship title", title, 255);
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

        if data.stipend.map_or(false, |s| s < 0) {
            result.add_error("stipend", "Stipend cannot be negative");
        }
        check_duration(&mut result, data.resolved_duration_months());
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("application_deadline", data.application_deadline.as_deref());
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}
