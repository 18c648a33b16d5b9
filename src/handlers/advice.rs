// src/handlers/advice.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use validator::{Validate, ValidationError};

use crate::{error::AppError, state::AppState, utils::html::render_rich_text};

#[derive(Debug, Deserialize, Validate)]
pub struct CareerAdviceRequest {
    #[validate(custom(function = validate_query))]
    pub query: String,

    /// Client view id. When set, only the newest request for the view is answered.
    #[validate(length(min = 1, max = 100))]
    pub view: Option<String>,
}

fn validate_query(query: &str) -> Result<(), ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(
            ValidationError::new("query_required").with_message("Please enter a question.".into())
        );
    }
    if trimmed.len() > 2000 {
        return Err(ValidationError::new("query_too_long"));
    }
    Ok(())
}

/// Free-text career Q&A for prospective students.
pub async fn career_advice(
    State(state): State<AppState>,
    Json(payload): Json<CareerAdviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = match &payload.view {
        Some(view) => Some(state.career_views.lock().await.issue(&format!("career:{}", view))),
        None => None,
    };

    let advice = match state.advisor.career_advice(payload.query.trim()).await {
        Ok(advice) => advice,
        Err(e) => {
            tracing::error!("Career advice failed: {:?}", e);
            if let Some(ticket) = &ticket {
                state.career_views.lock().await.retire(ticket);
            }
            return Err(e);
        }
    };

    if let Some(ticket) = ticket {
        if !state.career_views.lock().await.publish(&ticket, advice.clone()) {
            return Err(AppError::Conflict(
                "Superseded by a newer question.".to_string(),
            ));
        }
    }

    Ok(Json(json!({
        "advice": advice,
        "html": render_rich_text(&advice),
    })))
}
