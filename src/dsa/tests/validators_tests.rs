// src/dsa/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::dsa::models::*;
    use crate::dsa::validators::*;

    fn two_sum() -> CreateDsaProblem {
        CreateDsaProblem {
            title: "Two Sum".to_string(),
            description: "Find two indices adding up to target".to_string(),
            difficulty: "easy".to_string(),
            test_cases: vec![TestCase {
                input: "[2,7,11,15], 9".to_string(),
                expected_output: "[0,1]".to_string(),
                is_hidden: false,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_problem_validator_accepts_valid_problem() {
        assert!(DsaProblemValidator.validate(&two_sum()).is_valid);
    }

    #[test]
    fn test_problem_validator_rejects_unknown_difficulty() {
        let problem = CreateDsaProblem {
            difficulty: "impossible".to_string(),
            ..two_sum()
        };
        let result = DsaProblemValidator.validate(&problem);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "difficulty");
    }

    #[test]
    fn test_problem_validator_requires_expected_outputs() {
        let mut problem = two_sum();
        problem.test_cases[0].expected_output = "  ".to_string();
        let result = DsaProblemValidator.validate(&problem);
        assert_eq!(result.errors[0].field, "test_cases[0].expected_output");
    }

    #[test]
    fn test_update_validator_ignores_absent_fields() {
        let update = UpdateDsaProblem {
            time_complexity: Some("O(n)".to_string()),
            ..Default::default()
        };
        assert!(DsaProblemValidator.validate(&update).is_valid);
    }

    #[test]
    fn test_topic_requires_category() {
        let topic = CreateTopic {
            name: "Sliding window".to_string(),
            ..Default::default()
        };
        let result = TaxonomyValidator.validate(&topic);
        assert_eq!(result.errors[0].field, "category_id");
    }
}
