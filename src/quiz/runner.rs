// src/quiz/runner.rs

//! Timed multiple-choice test as a state machine.
//!
//! `Idle -> Instructions -> Loading -> Active -> Finished`. The runner holds no
//! timers itself: the owner calls [`TestRunner::tick`] once per second.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::{MAX_DISCOUNT_PERCENT, QUIZ_DURATION_SECS, REDIRECT_COUNTDOWN_SECS},
    error::AppError,
    models::{
        question::{OPTION_COUNT, PublicQuestion, TestQuestion},
        test_result::TestResult,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Idle,
    Instructions,
    Loading,
    Active,
    Finished,
}

/// What a one-second tick did.
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing to report; the countdown (if any) moved on.
    Continue,
    /// The countdown ran out and the test was scored.
    Finished(TestResult),
    /// The result screen countdown reached zero.
    Redirect,
    /// The runner is not in a timed state.
    Idle,
}

/// Score and discount of a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub score: u32,
    pub total_questions: u32,
    pub discount: u32,
}

/// Counts positions whose answer equals the question's correct index.
pub fn score(questions: &[TestQuestion], answers: &[Option<usize>]) -> u32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.correct_answer_index))
        .count() as u32
}

/// `round(score / total * 75)`; a zero total is treated as one.
pub fn discount(score: u32, total: u32) -> u32 {
    let total = total.max(1) as f64;
    (score as f64 / total * MAX_DISCOUNT_PERCENT as f64).round() as u32
}

#[derive(Debug)]
pub struct TestRunner {
    user_email: String,
    course: String,
    status: QuizStatus,
    duration_secs: u32,
    questions: Vec<TestQuestion>,
    answers: Vec<Option<usize>>,
    position: usize,
    remaining_secs: u32,
    redirect_secs: u32,
    outcome: Option<Outcome>,
    attempt: u64,
}

impl TestRunner {
    pub fn new(user_email: &str, course: &str) -> Self {
        Self {
            user_email: user_email.to_string(),
            course: course.to_string(),
            status: QuizStatus::Idle,
            duration_secs: QUIZ_DURATION_SECS,
            questions: Vec::new(),
            answers: Vec::new(),
            position: 0,
            remaining_secs: QUIZ_DURATION_SECS,
            redirect_secs: REDIRECT_COUNTDOWN_SECS,
            outcome: None,
            attempt: 0,
        }
    }

    /// Overrides the countdown length used by the next [`TestRunner::load`].
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    /// Increments on every successful load; timers compare it to detect a newer attempt.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn redirect_secs(&self) -> u32 {
        self.redirect_secs
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// `Idle -> Instructions`. A finished attempt may also be restarted from here.
    pub fn show_instructions(&mut self) -> Result<(), AppError> {
        match self.status {
            QuizStatus::Idle | QuizStatus::Finished => {
                self.status = QuizStatus::Instructions;
                Ok(())
            }
            _ => Err(self.wrong_state("show instructions")),
        }
    }

    /// `Instructions -> Loading`. Takes a snapshot of the course's questions;
    /// later bank edits do not reach this attempt. An unmapped or empty course
    /// sends the runner back to `Idle`.
    pub fn load(&mut self, bank: Option<&[TestQuestion]>) -> Result<(), AppError> {
        if self.status != QuizStatus::Instructions {
            return Err(self.wrong_state("start the test"));
        }

        let questions = match bank {
            Some(questions) if !questions.is_empty() => questions.to_vec(),
            _ => {
                self.status = QuizStatus::Idle;
                return Err(AppError::NoQuestionsAvailable(format!(
                    "No questions found for course: {}. Please contact support.",
                    self.course
                )));
            }
        };

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.position = 0;
        self.remaining_secs = self.duration_secs;
        self.outcome = None;
        self.attempt += 1;
        self.status = QuizStatus::Loading;
        Ok(())
    }

    /// `Loading -> Active`.
    pub fn activate(&mut self) -> Result<(), AppError> {
        if self.status != QuizStatus::Loading {
            return Err(self.wrong_state("activate the test"));
        }
        self.status = QuizStatus::Active;
        Ok(())
    }

    /// Records an answer for the current question; the last choice wins.
    pub fn select(&mut self, option: usize) -> Result<(), AppError> {
        self.require_active("answer")?;
        if option >= OPTION_COUNT {
            return Err(AppError::Validation(format!(
                "Option {} does not exist; choose 0-{}",
                option,
                OPTION_COUNT - 1
            )));
        }
        self.answers[self.position] = Some(option);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), AppError> {
        self.require_active("navigate")?;
        if self.position + 1 < self.questions.len() {
            self.position += 1;
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), AppError> {
        self.require_active("navigate")?;
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    /// Scores the attempt and enters `Finished`. Returns the result to persist,
    /// or `None` if the attempt was already finished.
    pub fn finish(&mut self) -> Result<Option<TestResult>, AppError> {
        match self.status {
            QuizStatus::Finished => Ok(None),
            QuizStatus::Active => Ok(Some(self.complete())),
            _ => Err(self.wrong_state("finish")),
        }
    }

    /// Advances whichever countdown belongs to the current state.
    pub fn tick(&mut self) -> TickOutcome {
        match self.status {
            QuizStatus::Active => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    TickOutcome::Finished(self.complete())
                } else {
                    TickOutcome::Continue
                }
            }
            QuizStatus::Finished if self.redirect_secs > 0 => {
                self.redirect_secs -= 1;
                if self.redirect_secs == 0 {
                    TickOutcome::Redirect
                } else {
                    TickOutcome::Continue
                }
            }
            _ => TickOutcome::Idle,
        }
    }

    pub fn view(&self) -> QuizView {
        let active = self.status == QuizStatus::Active;
        QuizView {
            status: self.status,
            course: self.course.clone(),
            position: self.position,
            total_questions: self.questions.len(),
            question: active
                .then(|| self.questions.get(self.position).map(PublicQuestion::from))
                .flatten(),
            selected_answers: self.answers.clone(),
            remaining_secs: self.remaining_secs,
            redirect_secs: (self.status == QuizStatus::Finished).then_some(self.redirect_secs),
            outcome: self.outcome,
        }
    }

    fn complete(&mut self) -> TestResult {
        let score = score(&self.questions, &self.answers);
        let total = (self.questions.len() as u32).max(1);
        let outcome = Outcome {
            score,
            total_questions: total,
            discount: discount(score, total),
        };

        self.outcome = Some(outcome);
        self.status = QuizStatus::Finished;
        self.redirect_secs = REDIRECT_COUNTDOWN_SECS;

        TestResult {
            id: Uuid::new_v4(),
            user_email: self.user_email.clone(),
            course: self.course.clone(),
            score,
            total_questions: total,
            discount: outcome.discount,
            date: Utc::now(),
            selected_answers: self.answers.clone(),
        }
    }

    fn require_active(&self, action: &str) -> Result<(), AppError> {
        if self.status == QuizStatus::Active {
            Ok(())
        } else {
            Err(self.wrong_state(action))
        }
    }

    fn wrong_state(&self, action: &str) -> AppError {
        AppError::BadRequest(format!(
            "Cannot {} while the test is {:?}",
            action, self.status
        ))
    }
}

/// Client-facing snapshot of a runner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub status: QuizStatus,
    pub course: String,
    pub position: usize,
    pub total_questions: usize,
    pub question: Option<PublicQuestion>,
    pub selected_answers: Vec<Option<usize>>,
    pub remaining_secs: u32,
    pub redirect_secs: Option<u32>,
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(n: usize) -> Vec<TestQuestion> {
        (0..n)
            .map(|i| TestQuestion::new(&format!("Q{i}"), ["A", "B", "C", "D"], i % 4))
            .collect()
    }

    fn active_runner(questions: &[TestQuestion]) -> TestRunner {
        let mut runner = TestRunner::new("s@x.com", "SAP Fiori/UI5 Development");
        runner.show_instructions().unwrap();
        runner.load(Some(questions)).unwrap();
        runner.activate().unwrap();
        runner
    }

    #[test]
    fn test_score_counts_matching_positions() {
        let questions = bank(4);
        let answers = [Some(0), Some(1), None, Some(0)];
        assert_eq!(score(&questions, &answers), 2);
        assert_eq!(score(&questions, &[None; 4]), 0);
    }

    #[test]
    fn test_discount_rounds() {
        assert_eq!(discount(3, 4), 56);
        assert_eq!(discount(4, 5), 60);
        assert_eq!(discount(1, 8), 9);
        assert_eq!(discount(0, 10), 0);
        assert_eq!(discount(10, 10), 75);
    }

    #[test]
    fn test_discount_floors_total_at_one() {
        assert_eq!(discount(0, 0), 0);
    }

    #[test]
    fn test_discount_stays_in_range() {
        for total in 1..=40 {
            for s in 0..=total {
                assert!(discount(s, total) <= MAX_DISCOUNT_PERCENT);
            }
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let questions = bank(5);
        let mut runner = TestRunner::new("s@x.com", "C");
        assert_eq!(runner.status(), QuizStatus::Idle);

        runner.show_instructions().unwrap();
        assert_eq!(runner.status(), QuizStatus::Instructions);

        runner.load(Some(&questions)).unwrap();
        assert_eq!(runner.status(), QuizStatus::Loading);
        assert_eq!(runner.answers(), &[None; 5]);
        assert_eq!(runner.remaining_secs(), QUIZ_DURATION_SECS);

        runner.activate().unwrap();
        assert_eq!(runner.status(), QuizStatus::Active);
    }

    #[test]
    fn test_load_without_questions_falls_back_to_idle() {
        let mut runner = TestRunner::new("s@x.com", "C");
        runner.show_instructions().unwrap();
        let err = runner.load(Some(&[])).unwrap_err();
        assert!(matches!(err, AppError::NoQuestionsAvailable(_)));
        assert_eq!(runner.status(), QuizStatus::Idle);

        runner.show_instructions().unwrap();
        assert!(runner.load(None).is_err());
        assert_eq!(runner.status(), QuizStatus::Idle);
    }

    #[test]
    fn test_load_takes_a_snapshot() {
        let mut questions = bank(3);
        let mut runner = active_runner(&questions);
        questions.clear();
        assert_eq!(runner.view().total_questions, 3);
        runner.select(0).unwrap();
        assert_eq!(runner.finish().unwrap().unwrap().total_questions, 3);
    }

    #[test]
    fn test_navigation_keeps_answers_and_reselection_wins() {
        let questions = bank(3);
        let mut runner = active_runner(&questions);

        runner.select(2).unwrap();
        runner.select(0).unwrap();
        runner.next().unwrap();
        runner.select(1).unwrap();
        runner.next().unwrap();
        runner.next().unwrap();
        assert_eq!(runner.position(), 2);
        runner.previous().unwrap();
        runner.previous().unwrap();
        runner.previous().unwrap();
        assert_eq!(runner.position(), 0);

        assert_eq!(runner.answers(), &[Some(0), Some(1), None]);
    }

    #[test]
    fn test_select_rejects_out_of_range_option() {
        let questions = bank(1);
        let mut runner = active_runner(&questions);
        assert!(matches!(runner.select(4), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_actions_outside_active_are_rejected() {
        let mut runner = TestRunner::new("s@x.com", "C");
        assert!(runner.select(0).is_err());
        assert!(runner.next().is_err());
        assert!(runner.finish().is_err());
        assert!(runner.activate().is_err());
    }

    #[test]
    fn test_finish_is_idempotent() {
        let questions = bank(5);
        let mut runner = active_runner(&questions);
        for i in 0..4 {
            runner.select(i % 4).unwrap();
            runner.next().unwrap();
        }

        let result = runner.finish().unwrap().unwrap();
        assert_eq!(result.score, 4);
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.discount, 60);
        assert_eq!(result.selected_answers.len(), 5);
        assert_eq!(result.selected_answers[4], None);

        assert!(runner.finish().unwrap().is_none());
        assert_eq!(runner.status(), QuizStatus::Finished);
    }

    #[test]
    fn test_countdown_expiry_finishes_exactly_once() {
        let questions = bank(2);
        let mut runner = TestRunner::new("s@x.com", "C").with_duration(1);
        runner.show_instructions().unwrap();
        runner.load(Some(&questions)).unwrap();
        runner.activate().unwrap();

        assert!(matches!(runner.tick(), TickOutcome::Finished(_)));
        assert_eq!(runner.status(), QuizStatus::Finished);
        assert!(!matches!(runner.tick(), TickOutcome::Finished(_)));
        assert!(runner.finish().unwrap().is_none());
    }

    #[test]
    fn test_zero_seconds_remaining_finishes_on_next_tick() {
        let questions = bank(2);
        let mut runner = TestRunner::new("s@x.com", "C").with_duration(0);
        runner.show_instructions().unwrap();
        runner.load(Some(&questions)).unwrap();
        runner.activate().unwrap();

        let finished = (0..5)
            .filter(|_| matches!(runner.tick(), TickOutcome::Finished(_)))
            .count();
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_countdown_decrements_while_active() {
        let questions = bank(2);
        let mut runner = active_runner(&questions);
        assert!(matches!(runner.tick(), TickOutcome::Continue));
        assert_eq!(runner.remaining_secs(), QUIZ_DURATION_SECS - 1);
    }

    #[test]
    fn test_redirect_countdown_after_finish() {
        let questions = bank(1);
        let mut runner = active_runner(&questions);
        runner.finish().unwrap();
        assert_eq!(runner.redirect_secs(), REDIRECT_COUNTDOWN_SECS);

        for _ in 0..REDIRECT_COUNTDOWN_SECS - 1 {
            assert!(matches!(runner.tick(), TickOutcome::Continue));
        }
        assert!(matches!(runner.tick(), TickOutcome::Redirect));
        assert!(matches!(runner.tick(), TickOutcome::Idle));
    }

    #[test]
    fn test_redirect_countdown_resets_on_reentry() {
        let questions = bank(1);
        let mut runner = active_runner(&questions);
        runner.finish().unwrap();
        runner.tick();
        runner.tick();

        runner.show_instructions().unwrap();
        runner.load(Some(&questions)).unwrap();
        runner.activate().unwrap();
        runner.finish().unwrap();
        assert_eq!(runner.redirect_secs(), REDIRECT_COUNTDOWN_SECS);
        assert_eq!(runner.attempt(), 2);
    }

    #[test]
    fn test_view_hides_answers_and_question_outside_active() {
        let questions = bank(2);
        let mut runner = active_runner(&questions);
        let view = runner.view();
        assert_eq!(view.question.unwrap().question, "Q0");
        assert!(view.redirect_secs.is_none());

        runner.finish().unwrap();
        let view = runner.view();
        assert!(view.question.is_none());
        assert_eq!(view.outcome.unwrap().score, 0);
        assert_eq!(view.redirect_secs, Some(REDIRECT_COUNTDOWN_SECS));
    }
}
