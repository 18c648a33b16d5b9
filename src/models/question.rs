// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question owned by the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub question: String,

    /// Exactly four answer options, presented in this order.
    pub options: [String; OPTION_COUNT],

    /// 0-based index into `options`.
    pub correct_answer_index: usize,
}

impl TestQuestion {
    pub fn new(question: &str, options: [&str; OPTION_COUNT], correct_answer_index: usize) -> Self {
        Self {
            question: question.to_string(),
            options: options.map(str::to_string),
            correct_answer_index,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.correct_answer_index < OPTION_COUNT
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index.min(OPTION_COUNT - 1)]
    }
}

/// DTO for sending a question to a quiz taker (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub question: String,
    pub options: [String; OPTION_COUNT],
}

impl From<&TestQuestion> for PublicQuestion {
    fn from(q: &TestQuestion) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

/// DTO for manually adding a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "Question text is required."))]
    pub question: String,
    #[validate(custom(function = validate_options))]
    pub options: [String; OPTION_COUNT],
    #[validate(range(max = 3, message = "Correct answer must be one of options A-D."))]
    pub correct_answer_index: usize,
}

impl From<CreateQuestionRequest> for TestQuestion {
    fn from(req: CreateQuestionRequest) -> Self {
        Self {
            question: req.question.trim().to_string(),
            options: req.options.map(|o| o.trim().to_string()),
            correct_answer_index: req.correct_answer_index,
        }
    }
}

fn validate_options(options: &[String; OPTION_COUNT]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// DTO for asking the AI service for new questions.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(range(min = 1, max = 15, message = "Between 1 and 15 questions can be generated at once."))]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let q = TestQuestion::new("Q?", ["A", "B", "C", "D"], 2);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctAnswerIndex"], 2);
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_three_options_are_rejected_by_serde() {
        let raw = r#"{"question":"Q","options":["A","B","C"],"correctAnswerIndex":0}"#;
        assert!(serde_json::from_str::<TestQuestion>(raw).is_err());
    }

    #[test]
    fn test_create_request_rejects_blank_option() {
        let req = CreateQuestionRequest {
            question: "Q".to_string(),
            options: ["A".into(), " ".into(), "C".into(), "D".into()],
            correct_answer_index: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_out_of_range_answer() {
        let req = CreateQuestionRequest {
            question: "Q".to_string(),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer_index: 4,
        };
        assert!(req.validate().is_err());
    }
}
