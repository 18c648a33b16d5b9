// src/services/advisor.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

use crate::{config::Config, error::AppError};

/// A question the student got wrong, in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub question: String,
    pub student_answer: String,
    pub correct_answer: String,
}

/// The external text-generation service.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Raw JSON text of `count` generated questions for a course.
    /// Callers validate it with `question_import::parse_generated`.
    async fn request_questions(&self, course_name: &str, count: u32) -> Result<String, AppError>;

    /// Free-text career guidance.
    async fn career_advice(&self, query: &str) -> Result<String, AppError>;

    /// Study tips derived from a student's mistakes.
    async fn study_tips(&self, course_name: &str, mistakes: &[WrongAnswer]) -> Result<String, AppError>;
}

const CAREER_COUNSELOR: &str = "You are a friendly and encouraging AI career counselor for a \
    training company that specializes in SAP careers. Provide clear, concise, and helpful advice. \
    Keep responses to a few paragraphs. Use markdown for formatting like lists or bold text if it \
    improves readability.";

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiAdvisor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
        }
    }

    async fn generate_content(&self, body: Value) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalServiceFailure("GEMINI_API_KEY is not configured".to_string())
        })?;

        let endpoint = self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|e| AppError::ExternalServiceFailure(e.to_string()))?;

        let response: GenerateContentResponse = self
            .client
            .post(endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.text())
    }
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn request_questions(&self, course_name: &str, count: u32) -> Result<String, AppError> {
        let prompt = format!(
            "Generate {count} difficult, professional-level multiple-choice questions for an \
             advanced course on \"{course_name}\".\n\
             Each question must have exactly 4 plausible options and a single correct answer.\n\
             The questions should be suitable for a skills assessment test for professionals.\n\
             Ensure the 'correctAnswerIndex' is a number from 0 to 3.\n\
             The options array must contain exactly 4 string elements.\n\
             Return the response as a JSON array of objects."
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "question": { "type": "STRING" },
                            "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                            "correctAnswerIndex": { "type": "INTEGER" }
                        },
                        "required": ["question", "options", "correctAnswerIndex"]
                    }
                }
            }
        });

        tracing::info!("Requesting {} AI questions for {}", count, course_name);
        self.generate_content(body).await
    }

    async fn career_advice(&self, query: &str) -> Result<String, AppError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": CAREER_COUNSELOR }] },
            "contents": [{ "parts": [{ "text": query }] }],
        });
        self.generate_content(body).await
    }

    async fn study_tips(&self, course_name: &str, mistakes: &[WrongAnswer]) -> Result<String, AppError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": study_tips_prompt(course_name, mistakes) }] }],
        });
        self.generate_content(body).await
    }
}

fn study_tips_prompt(course_name: &str, mistakes: &[WrongAnswer]) -> String {
    let listed: String = mistakes
        .iter()
        .map(|m| {
            format!(
                "- Question: \"{}\"\n  - Their incorrect answer: \"{}\"\n  - The correct answer was: \"{}\"\n",
                m.question, m.student_answer, m.correct_answer
            )
        })
        .collect();

    format!(
        "You are an expert SAP instructor. A student is studying for a course on \"{course_name}\".\n\
         They answered the following questions incorrectly. Based on their mistakes, provide 3-5 \
         specific, actionable study tips to help them improve.\n\n\
         Here are their mistakes:\n{listed}\n\
         Frame your response in a positive and encouraging tone. Start with a brief encouraging \
         sentence. Then, provide the tips as a numbered list in markdown.\n\
         Focus on the underlying concepts they might be misunderstanding."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "Hello world");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_study_tips_prompt_lists_every_mistake() {
        let mistakes = vec![
            WrongAnswer {
                question: "Q1".into(),
                student_answer: "Not Answered".into(),
                correct_answer: "B".into(),
            },
            WrongAnswer {
                question: "Q2".into(),
                student_answer: "A".into(),
                correct_answer: "C".into(),
            },
        ];
        let prompt = study_tips_prompt("SAP CAP & Node.js on BTP", &mistakes);
        assert!(prompt.contains("\"SAP CAP & Node.js on BTP\""));
        assert!(prompt.contains("Question: \"Q1\""));
        assert!(prompt.contains("Their incorrect answer: \"Not Answered\""));
        assert!(prompt.contains("The correct answer was: \"C\""));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_service_failure() {
        let advisor = GeminiAdvisor {
            client: reqwest::Client::new(),
            api_key: None,
            model: "m".into(),
            base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
        };
        let err = advisor.career_advice("hi").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceFailure(_)));
    }
}
