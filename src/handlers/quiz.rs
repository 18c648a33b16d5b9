// src/handlers/quiz.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::{error::AppError, quiz::host, state::AppState, utils::jwt::CurrentUser};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option: usize,
}

/// Current state of the session's test runner.
pub async fn get_quiz(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        host::view(&state, current.session_id, &current.identity).await,
    ))
}

pub async fn show_instructions(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::show_instructions(&state, current.session_id, &current.identity).await?;
    Ok(Json(view))
}

/// Loads the questions of the user's registered course and starts the countdown.
pub async fn start(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::start(&state, current.session_id, &current.identity).await?;
    Ok(Json(view))
}

/// Selects an option for the current question.
pub async fn answer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::select(&state, current.session_id, &current.identity, req.option).await?;
    Ok(Json(view))
}

pub async fn next(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::next(&state, current.session_id, &current.identity).await?;
    Ok(Json(view))
}

pub async fn previous(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::previous(&state, current.session_id, &current.identity).await?;
    Ok(Json(view))
}

/// Scores the attempt and stores the result. Repeated calls are no-ops.
pub async fn finish(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = host::finish(&state, current.session_id, &current.identity).await?;
    Ok(Json(view))
}
