// src/jobs/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::jobs::models::*;
    use crate::jobs::validators::*;

    fn valid_job() -> CreateJob {
        CreateJob {
            title: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build things".to_string(),
            location: "Bengaluru".to_string(),
            salary_min: Some(500000),
            salary_max: Some(900000),
            job_type: "full-time".to_string(),
            experience_level: "fresher".to_string(),
            requirements: vec!["Rust".to_string(), "SQL".to_string()],
            application_deadline: Some("2030-06-30".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_job_validator_valid_data() {
        let result = JobValidator.validate(&valid_job());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_job_validator_invalid_title() {
        let request = CreateJob {
            title: "".to_string(),
            ..valid_job()
        };

        let result = JobValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_job_validator_rejects_unknown_enums() {
        let request = CreateJob {
            job_type: "temporary".to_string(),
            experience_level: "".to_string(),
            status: Some("deleted".to_string()),
            ..valid_job()
        };

        let result = JobValidator.validate(&request);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["job_type", "experience_level", "status"]);
    }

    #[test]
    fn test_job_validator_salary_range_and_dates() {
        let request = CreateJob {
            salary_min: Some(900000),
            salary_max: Some(500000),
            expiration_date: Some("soon".to_string()),
            ..valid_job()
        };

        let result = JobValidator.validate(&request);
        assert!(result.errors.iter().any(|e| e.field == "salary_range"));
        assert!(result.errors.iter().any(|e| e.field == "expiration_date"));
    }

    #[test]
    fn test_update_validator_allows_empty_update() {
        assert!(JobValidator.validate(&UpdateJob::default()).is_valid);

        let update = UpdateJob {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!JobValidator.validate(&update).is_valid);
    }
}
