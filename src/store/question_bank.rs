// src/store/question_bank.rs

use std::collections::HashMap;

use crate::{
    error::AppError,
    models::{course::Course, question::TestQuestion},
    seed,
};

/// Questions per course key, in insertion order.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: HashMap<String, Vec<TestQuestion>>,
}

impl QuestionBank {
    /// Creates one list per course, seeded from the legacy bank where a legacy
    /// code is known for the course name, empty otherwise.
    pub fn initialize(courses: &[Course]) -> Self {
        let questions = courses
            .iter()
            .map(|course| {
                let seeded = seed::legacy_code_for(&course.name)
                    .map(seed::legacy_questions)
                    .unwrap_or_default();
                (course.key(), seeded)
            })
            .collect();
        Self { questions }
    }

    /// Questions for a key, or `None` if the key was never mapped.
    pub fn get(&self, key: &str) -> Option<&[TestQuestion]> {
        self.questions.get(key).map(Vec::as_slice)
    }

    pub fn total(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }

    pub fn add(&mut self, key: &str, question: TestQuestion) {
        self.questions.entry(key.to_string()).or_default().push(question);
    }

    pub fn add_many(&mut self, key: &str, questions: Vec<TestQuestion>) {
        self.questions.entry(key.to_string()).or_default().extend(questions);
    }

    /// Removes the question at `index` and returns it.
    pub fn delete(&mut self, key: &str, index: usize) -> Result<TestQuestion, AppError> {
        let list = self
            .questions
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound(format!("No questions for course key '{}'", key)))?;
        if index >= list.len() {
            return Err(AppError::NotFound(format!("Question {} not found", index)));
        }
        Ok(list.remove(index))
    }
}
