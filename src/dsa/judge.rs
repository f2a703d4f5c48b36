// src/dsa/judge.rs
//! Output-comparison judge. Code is never executed; the client submits the
//! output its run produced for each test case and those are compared here.

use super::models::TestCase;

pub const ACCEPTED: &str = "accepted";
pub const WRONG_ANSWER: &str = "wrong_answer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: &'static str,
    pub passed: i64,
    pub total: i64,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        self.status == ACCEPTED
    }
}

/// Compares `outputs[i]` with `test_cases[i].expected_output`, ignoring
/// surrounding whitespace. Missing outputs count as failures.
pub fn judge(test_cases: &[TestCase], outputs: &[String]) -> Verdict {
    let passed = test_cases
        .iter()
        .zip(outputs.iter())
        .filter(|(tc, out)| tc.expected_output.trim() == out.trim())
        .count() as i64;
    let total = test_cases.len() as i64;

    Verdict {
        status: if passed == total { ACCEPTED } else { WRONG_ANSWER },
        passed,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(input: &str, expected: &str) -> TestCase {
        TestCase {
            input: input.to_string(),
            expected_output: expected.to_string(),
            is_hidden: false,
        }
    }

    #[test]
    fn test_all_outputs_match_after_trimming() {
        let cases = vec![case("[2,7,11,15], 9", "[0,1]"), case("[3,2,4], 6", "[1,2]")];
        let outputs = vec!["[0,1]\n".to_string(), "  [1,2]".to_string()];
        let verdict = judge(&cases, &outputs);
        assert!(verdict.is_accepted());
        assert_eq!(verdict.passed, 2);
        assert_eq!(verdict.total, 2);
    }

    #[test]
    fn test_missing_and_wrong_outputs_fail() {
        let cases = vec![case("1", "1"), case("2", "4"), case("3", "9")];
        let verdict = judge(&cases, &["1".to_string(), "5".to_string()]);
        assert_eq!(verdict.status, WRONG_ANSWER);
        assert_eq!(verdict.passed, 1);
        assert_eq!(verdict.total, 3);
    }

    #[test]
    fn test_no_test_cases_is_accepted() {
        assert!(judge(&[], &[]).is_accepted());
    }
}
