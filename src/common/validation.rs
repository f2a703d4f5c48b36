// Common validation types and traits

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Records an error when `value` is blank, or longer than `max_len` characters
    pub fn require_text(&mut self, field: &str, label: &str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add_error(field, &format!("{} is required", label));
        } else if value.chars().count() > max_len {
            self.add_error(
                field,
                &format!("{} must be less than {} characters", label, max_len),
            );
        }
    }

    /// Records an error when an optional value is present but not in `allowed`
    pub fn check_one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) {
        if let Some(v) = value {
            if !allowed.contains(&v) {
                self.add_error(
                    field,
                    &format!("Invalid {}, expected one of: {}", field, allowed.join(", ")),
                );
            }
        }
    }

    /// Records an error when an optional slug is malformed
    pub fn check_slug(&mut self, value: Option<&str>) {
        if let Some(slug) = value {
            if !is_valid_slug(slug) {
                self.add_error("slug", "Slug must be lowercase letters, digits and dashes");
            }
        }
    }

    /// Records an error when an optional date does not parse
    pub fn check_timestamp(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if super::helpers::normalize_timestamp(v).is_none() {
                self.add_error(field, "Invalid date, expected RFC 3339 or YYYY-MM-DD");
            }
        }
    }

    /// Records an error when both bounds are present and `min > max`
    pub fn check_range(&mut self, field: &str, min: Option<i64>, max: Option<i64>) {
        if min.map_or(false, |v| v < 0) || max.map_or(false, |v| v < 0) {
            self.add_error(field, "Values cannot be negative");
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                self.add_error(field, "Minimum cannot be greater than maximum");
            }
        }
    }

    /// Turns the result into a `Result`, for use with `?` in handlers
    pub fn into_result(self) -> Result<(), super::ApiError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

/// Slugs are lowercase ASCII letters, digits and single dashes
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 200
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_blank_and_too_long() {
        let mut result = ValidationResult::new();
        result.require_text("title", "Title", "   ", 10);
        result.require_text("company", "Company", "a very long company name", 10);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].message, "Title is required");
    }

    #[test]
    fn test_check_one_of_ignores_missing_values() {
        let mut result = ValidationResult::new();
        result.check_one_of("status", None, &["draft", "published"]);
        assert!(result.is_valid);

        result.check_one_of("status", Some("deleted"), &["draft", "published"]);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_check_timestamp_and_range() {
        let mut result = ValidationResult::new();
        result.check_timestamp("application_deadline", Some("2030-01-31"));
        result.check_range("salary", Some(10), Some(20));
        assert!(result.is_valid);

        result.check_timestamp("application_deadline", Some("next week"));
        result.check_range("salary", Some(30), Some(20));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("rust-ownership-101"));
        assert!(!is_valid_slug("Rust Ownership"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug(""));
    }
}
