// src/articles/validators.rs

use super::models::*;
use crate::common::query::CONTENT_STATUSES;
use crate::common::{ValidationResult, Validator};

pub struct ArticleValidator;

impl Validator<CreateArticle> for ArticleValidator {
    fn validate(&self, data: &CreateArticle) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_text("title", "Title", &data.title, 255);
        result.require_text("content", "Content", &data.content, 200_000);
        result.require_text("category", "Category", &data.category, 100);
        result.check_slug(data.slug.as_deref());
        if data.reading_time_minutes.map_or(false, |m| m < 0) {
            result.add_error("reading_time_minutes", "Reading time cannot be negative");
        }
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

impl Validator<UpdateArticle> for ArticleValidator {
    fn validate(&self, data: &UpdateArticle) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require_text("title", "Title", title, 255);
        }
        if let Some(content) = &data.content {
            result.require_text("content", "Content", content, 200_000);
        }
        if let Some(category) = &data.category {
            result.require_text("category", "Category", category, 100);
        }
        result.check_slug(data.slug.as_deref());
        result.check_one_of("status", data.status.as_deref(), &CONTENT_STATUSES);
        result.check_timestamp("expiration_date", data.expiration_date.as_deref());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_requires_category() {
        let data = CreateArticle {
            title: "Interview tips".to_string(),
            content: "Prepare well".to_string(),
            ..Default::default()
        };
        let result = ArticleValidator.validate(&data);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "category");
    }
}
