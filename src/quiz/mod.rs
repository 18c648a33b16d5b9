// src/quiz/mod.rs

pub mod host;
pub mod runner;

pub use runner::{QuizStatus, QuizView, TestRunner, TickOutcome};
