// src/services/question_import.rs

//! Bulk question sources: CSV uploads and AI generation.

use serde_json::Value;

use crate::{
    error::AppError,
    models::question::{OPTION_COUNT, TestQuestion},
    services::advisor::Advisor,
};

pub const CSV_HEADER: [&str; 6] = [
    "question",
    "optionA",
    "optionB",
    "optionC",
    "optionD",
    "correctAnswer",
];

const CSV_EXAMPLE: [&str; 6] = [
    "What is the capital of France?",
    "London",
    "Berlin",
    "Paris",
    "Madrid",
    "C",
];

pub const CSV_TEMPLATE_FILENAME: &str = "question_template.csv";

/// Parses uploaded CSV text.
///
/// The first line is a header and is skipped. Every other line is split on
/// plain commas into exactly six fields; a single leading and trailing double
/// quote is stripped from each. Lines with the wrong field count, an empty
/// field, or a correct-answer letter other than A-D are dropped.
pub fn parse_csv(text: &str) -> Vec<TestQuestion> {
    text.trim()
        .lines()
        .skip(1)
        .filter_map(parse_csv_line)
        .collect()
}

fn parse_csv_line(line: &str) -> Option<TestQuestion> {
    let values: Vec<&str> = line.split(',').map(strip_field).collect();
    let [question, a, b, c, d, letter] = values.as_slice() else {
        return None;
    };

    let correct_answer_index = match letter.to_ascii_uppercase().as_str() {
        "A" => 0,
        "B" => 1,
        "C" => 2,
        "D" => 3,
        _ => return None,
    };

    let options = [*a, *b, *c, *d];
    if question.is_empty() || options.iter().any(|o| o.is_empty()) {
        return None;
    }

    Some(TestQuestion::new(question, options, correct_answer_index))
}

fn strip_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

/// The downloadable template: header plus one example row.
pub fn csv_template() -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .and_then(|_| writer.write_record(CSV_EXAMPLE))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Validates the raw JSON the AI service produced for a generation request.
///
/// The response must be a non-empty array whose first element has a string
/// `question`, an array `options` and a numeric `correctAnswerIndex`.
/// Later elements that do not form a valid question are skipped.
pub fn parse_generated(raw: &str) -> Result<Vec<TestQuestion>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::InvalidAIResponse(
            "Received an empty response from the AI. Please try again.".to_string(),
        ));
    }

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidAIResponse(format!("AI response is not JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => {
            return Err(AppError::InvalidAIResponse(
                "AI response was not a valid array of questions.".to_string(),
            ));
        }
    };

    let sample = &items[0];
    if !sample["question"].is_string()
        || !sample["options"].is_array()
        || !sample["correctAnswerIndex"].is_number()
    {
        return Err(AppError::InvalidAIResponse(
            "The format of the generated questions is incorrect.".to_string(),
        ));
    }

    let total = items.len();
    let questions: Vec<TestQuestion> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<TestQuestion>(item).ok())
        .filter(TestQuestion::is_well_formed)
        .collect();

    if questions.len() < total {
        tracing::warn!(
            "Dropped {} malformed AI questions (expected {} options each)",
            total - questions.len(),
            OPTION_COUNT
        );
    }
    if questions.is_empty() {
        return Err(AppError::InvalidAIResponse(
            "The format of the generated questions is incorrect.".to_string(),
        ));
    }
    Ok(questions)
}

/// Requests `count` questions for a course and validates the response.
pub async fn generate(
    advisor: &dyn Advisor,
    course_name: &str,
    count: u32,
) -> Result<Vec<TestQuestion>, AppError> {
    let raw = advisor.request_questions(course_name, count).await?;
    parse_generated(&raw)
}
