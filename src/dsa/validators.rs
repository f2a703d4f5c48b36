// src/dsa/validators.rs

use super::models::*;
use crate::common::query::CONTENT_STATUSES;
use crate::common::{ValidationResult, Validator};

pub struct DsaProblemValidator;

fn check_test_cases(result: &mut ValidationResult, cases: &[TestCase]) {
    for (index, case) in cases.iter().enumerate() {
        if case.expected_output.trim().is_empty() {
            result.add_error(
                &format!("test_cases[{}].expected_output", index),
                "Expected output is required",
            );
        }
    }
}

impl Validator<CreateDsaProblem> for DsaProblemValidator {
    fn validate(&self, data: &CreateDsaProblem) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_text("title", "Title", &data.title, 255);
        result.require_text("description", "Description", &data.description, 50_000);
        result.check_slug(data.slug.as_deref());
        result.check_one_of("difficulty", Some(data.difficulty.as_str()), &DIFFICULTIES);
        check_test_cases(&mut result, &data.test_cases);
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

impl Validator<UpdateDsaProblem> for DsaProblemValidator {
    fn validate(&self, data: &UpdateDsaProblem) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require_text("title", "Title", title, 255);
        }
        if let Some(description) = &data.description {
            result.require_text("description", "Description", description, 50_000);
        }
        result.check_slug(data.slug.as_deref());
        result.check_one_of("difficulty", data.difficulty.as_deref(), &DIFFICULTIES);
        if let Some(cases) = &data.test_cases {
            check_test_cases(&mut result, cases);
        }
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

pub struct TaxonomyValidator;

impl Validator<CreateCategory> for TaxonomyValidator {
    fn validate(&self, data: &CreateCategory) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require_text("name", "Name", &data.name, 100);
        result
    }
}

impl Validator<CreateTopic> for TaxonomyValidator {
    fn validate(&self, data: &CreateTopic) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require_text("category_id", "Category", &data.category_id, 64);
        result.require_text("name", "Name", &data.name, 100);
        result
    }
}
