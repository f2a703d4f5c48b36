// src/internships/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::internships::models::*;
    use crate::internships::validators::*;

    fn valid_internship() -> CreateInternship {
        CreateInternship {
            title: "Frontend Intern".to_string(),
            company: "Acme".to_string(),
            description: "React and TypeScript".to_string(),
            location: "Remote".to_string(),
            stipend: Some(15000),
            ..Default::default()
        }
    }

    #[test]
    fn test_duration_resolution() {
        let mut data = valid_internship();
        assert_eq!(data.resolved_duration_months(), 3);

        data.duration = Some("6 Months".to_string());
        assert_eq!(data.resolved_duration_months(), 6);

        data.duration = Some("twelve weeks".to_string());
        assert_eq!(data.resolved_duration_months(), 3);

        data.duration_months = Some(4);
        assert_eq!(data.resolved_duration_months(), 4);
    }

    #[test]
    fn test_internship_validator() {
        assert!(InternshipValidator.validate(&valid_internship()).is_valid);

        let invalid = CreateInternship {
            stipend: Some(-1),
            duration_months: Some(0),
            company: " ".to_string(),
            ..valid_internship()
        };
        let result = InternshipValidator.validate(&invalid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["company", "stipend", "duration_months"]);
    }

    #[test]
    fn test_update_duration_string() {
        let update = UpdateInternship {
            duration: Some("2 months".to_string()),
            ..Default::default()
        };
        assert_eq!(update.resolved_duration_months(), Some(2));
        assert_eq!(UpdateInternship::default().resolved_duration_months(), None);
    }
}
