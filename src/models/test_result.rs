// src/models/test_result.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of one finished quiz. At most one exists per (user_email, course).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Stable identifier, independent of the result's position in the store.
    pub id: Uuid,
    pub user_email: String,
    pub course: String,
    pub score: u32,
    pub total_questions: u32,

    /// Percentage in `0..=75`.
    pub discount: u32,
    pub date: DateTime<Utc>,

    /// Positionally aligned with the question list at scoring time; `None` is unanswered.
    pub selected_answers: Vec<Option<usize>>,
}

/// One line of a result report: a question next to the answer given.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReview {
    pub question: String,
    pub options: Vec<String>,
    pub selected_answer_index: Option<usize>,
    pub correct_answer_index: usize,
    pub is_correct: bool,
}

/// A result joined with the questions of its course.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReport {
    pub result: TestResult,
    pub review: Vec<AnswerReview>,
}

/// Entry of a score distribution histogram.
#[derive(Debug, Serialize, PartialEq)]
pub struct ScoreBucket {
    pub range: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregated numbers for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub students: usize,
    pub courses: usize,
    pub questions: usize,
    pub results: usize,
    pub score_distribution: Vec<ScoreBucket>,
    pub recent_results: Vec<TestResult>,
    pub recent_students: Vec<crate::models::user::User>,
}
