// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 400 Bad Request (missing/short/mismatched fields, malformed rows)
    Validation(String),

    // 401 Unauthorized
    AuthError(String),

    // 401 Unauthorized (email/password mismatch)
    InvalidCredentials,

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., superseded request)
    Conflict(String),

    // 409 Conflict (course name collision)
    DuplicateName(String),

    // 422 Unprocessable Entity (quiz start with an empty or unmapped course)
    NoQuestionsAvailable(String),

    // 502 Bad Gateway (AI output did not have the expected shape)
    InvalidAIResponse(String),

    // 503 Service Unavailable (AI call rejected or errored)
    ExternalServiceFailure(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials. Please make sure you have registered first.".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DuplicateName(name) => (
                StatusCode::CONFLICT,
                format!("A course named '{}' already exists.", name),
            ),
            AppError::NoQuestionsAvailable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InvalidAIResponse(msg) => {
                tracing::warn!("Invalid AI response: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::ExternalServiceFailure(msg) => {
                tracing::error!("External service failure: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The AI service is unavailable right now. Please try again later.".to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Transport or HTTP status failures when talking to the AI service.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalServiceFailure(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errs: validator::ValidationErrors) -> Self {
        AppError::Validation(errs.to_string())
    }
}
