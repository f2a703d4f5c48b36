// src/dsa/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::parse_json_list;

pub const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

// ============================================================================
// Taxonomy
// ============================================================================

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct DsaCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct DsaTopic {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateTopic {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
}

// ============================================================================
// Problems
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    /// Hidden cases are judged but never shown to users
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProblemExample {
    pub input: String,
    pub output: String,
    pub explanation: Option<String>,
}

#[derive(FromRow, Debug, Clone)]
pub struct DsaProblem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub difficulty: String,
    pub category_id: Option<String>,
    pub topic_id: Option<String>,
    pub tags: Option<String>,
    pub examples: Option<String>,
    pub constraints: Option<String>,
    pub hints: Option<String>,
    pub test_cases: Option<String>,
    pub solution_approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub attempts: i64,
    pub solved_count: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DsaProblem {
    pub fn test_cases(&self) -> Vec<TestCase> {
        parse_json_list(self.test_cases.as_deref())
    }

    pub fn hints(&self) -> Vec<String> {
        parse_json_list(self.hints.as_deref())
    }
}

#[derive(Serialize, Debug)]
pub struct DsaProblemResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub difficulty: String,
    pub category_id: Option<String>,
    pub topic_id: Option<String>,
    pub tags: Vec<String>,
    pub examples: Vec<ProblemExample>,
    pub constraints: Vec<String>,
    pub hints: Vec<String>,
    pub test_cases: Vec<TestCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub status: String,
    pub expiration_date: Option<String>,
    pub attempts: i64,
    pub solved_count: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
    /// Caller's progress status, present only on listings for signed-in users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<String>,
}

impl From<DsaProblem> for DsaProblemResponse {
    fn from(p: DsaProblem) -> Self {
        DsaProblemResponse {
            tags: parse_json_list(p.tags.as_deref()),
            examples: parse_json_list(p.examples.as_deref()),
            constraints: parse_json_list(p.constraints.as_deref()),
            hints: parse_json_list(p.hints.as_deref()),
            test_cases: parse_json_list(p.test_cases.as_deref()),
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            difficulty: p.difficulty,
            category_id: p.category_id,
            topic_id: p.topic_id,
            solution_approach: p.solution_approach,
            time_complexity: p.time_complexity,
            space_complexity: p.space_complexity,
            status: p.status,
            expiration_date: p.expiration_date,
            attempts: p.attempts,
            solved_count: p.solved_count,
            created_by: p.created_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
            user_status: None,
        }
    }
}

impl DsaProblemResponse {
    /// Strips the solution and hidden test cases for user-facing endpoints
    pub fn public_view(mut self) -> Self {
        self.solution_approach = None;
        self.test_cases.retain(|tc| !tc.is_hidden);
        self
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateDsaProblem {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub difficulty: String,
    pub category_id: Option<String>,
    pub topic_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<ProblemExample>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    pub solution_approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateDsaProblem {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub category_id: Option<String>,
    pub topic_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub examples: Option<Vec<ProblemExample>>,
    pub constraints: Option<Vec<String>>,
    pub hints: Option<Vec<String>>,
    pub test_cases: Option<Vec<TestCase>>,
    pub solution_approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
}

/// Admin list filters
#[derive(Debug, Default, Deserialize)]
pub struct DsaAdminQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
    pub category_id: Option<String>,
}

impl DsaAdminQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(50).clamp(1, 100),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProblemQuery {
    pub topic_id: Option<String>,
    pub category_id: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ProblemQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 100),
        )
    }
}

#[derive(Serialize, Debug)]
pub struct ProblemPage {
    pub problems: Vec<DsaProblemResponse>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl ProblemPage {
    pub fn new(problems: Vec<DsaProblemResponse>, total: i64, skip: i64, limit: i64) -> Self {
        ProblemPage {
            problems,
            total,
            page: skip / limit + 1,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

// ============================================================================
// Submissions and progress
// ============================================================================

#[derive(Deserialize, Debug, Default)]
pub struct SubmitSolution {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Program output per test case, in test case order
    #[serde(default)]
    pub outputs: Vec<String>,
}

fn default_language() -> String {
    "python".to_string()
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct Submission {
    pub id: String,
    pub problem_id: String,
    pub user_id: String,
    pub code: String,
    pub language: String,
    pub status: String,
    pub test_cases_passed: i64,
    pub total_test_cases: i64,
    pub submitted_at: String,
}

#[derive(Serialize, Debug)]
pub struct SubmissionResult {
    pub submission_id: String,
    pub status: String,
    pub test_cases_passed: i64,
    pub total_test_cases: i64,
    pub message: String,
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct UserProgress {
    pub user_id: String,
    pub problem_id: String,
    pub status: String,
    pub attempts: i64,
    pub best_solution: Option<String>,
    pub best_language: Option<String>,
    pub last_attempted: Option<String>,
    pub solved_at: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ProblemDetail {
    pub problem: DsaProblemResponse,
    pub user_progress: Option<UserProgress>,
    pub recent_submissions: Vec<Submission>,
}

#[derive(Serialize, Debug)]
pub struct SolutionView {
    pub solution_approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub user_best_solution: Option<String>,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct DifficultyProgress {
    pub solved: i64,
    pub total: i64,
}

#[derive(Serialize, Debug, Default)]
pub struct ProgressByDifficulty {
    pub easy: DifficultyProgress,
    pub medium: DifficultyProgress,
    pub hard: DifficultyProgress,
}

impl ProgressByDifficulty {
    pub fn slot(&mut self, difficulty: &str) -> Option<&mut DifficultyProgress> {
        match difficulty {
            "easy" => Some(&mut self.easy),
            "medium" => Some(&mut self.medium),
            "hard" => Some(&mut self.hard),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ProgressSummary {
    pub total_solved: i64,
    pub total_problems: i64,
    pub by_difficulty: ProgressByDifficulty,
}

// ============================================================================
// Discussions
// ============================================================================

#[derive(FromRow, Debug, Clone)]
pub struct Discussion {
    pub id: String,
    pub problem_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub is_solution: i64,
    pub parent_id: Option<String>,
    pub created_at: String,
}

#[derive(Serialize, Debug)]
pub struct DiscussionResponse {
    pub id: String,
    pub problem_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub is_solution: bool,
    pub parent_id: Option<String>,
    pub created_at: String,
}

impl From<Discussion> for DiscussionResponse {
    fn from(d: Discussion) -> Self {
        DiscussionResponse {
            id: d.id,
            problem_id: d.problem_id,
            user_id: d.user_id,
            user_name: d.user_name,
            content: d.content,
            is_solution: d.is_solution != 0,
            parent_id: d.parent_id,
            created_at: d.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DiscussionThread {
    #[serde(flatten)]
    pub discussion: DiscussionResponse,
    pub replies: Vec<DiscussionResponse>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateDiscussion {
    pub content: String,
    #[serde(default)]
    pub is_solution: bool,
    pub parent_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscussionQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl DiscussionQuery {
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(20).clamp(1, 100),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_page_math() {
        let page = ProblemPage::new(Vec::new(), 45, 20, 20);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);

        let empty = ProblemPage::new(Vec::new(), 0, 0, 20);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
    }
}
