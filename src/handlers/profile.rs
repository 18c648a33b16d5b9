// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::{
        course::derive_key,
        question::TestQuestion,
        test_result::{AnswerReview, ResultReport, TestResult},
    },
    services::advisor::WrongAnswer,
    state::AppState,
    utils::{html::render_rich_text, jwt::CurrentUser},
};

const NOT_ANSWERED: &str = "Not Answered";

const ALL_CORRECT_TIPS: &str = "Great job! You answered all questions correctly. \
    Keep reviewing the course material to stay sharp!";

/// Pairs each question of the course with the answer stored in the result.
pub fn build_review(result: &TestResult, questions: &[TestQuestion]) -> Vec<AnswerReview> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let selected = result.selected_answers.get(i).copied().flatten();
            AnswerReview {
                question: q.question.clone(),
                options: q.options.to_vec(),
                selected_answer_index: selected,
                correct_answer_index: q.correct_answer_index,
                is_correct: selected == Some(q.correct_answer_index),
            }
        })
        .collect()
}

/// Questions answered wrongly or left unanswered, in display form.
pub fn wrong_answers(result: &TestResult, questions: &[TestQuestion]) -> Vec<WrongAnswer> {
    build_review(result, questions)
        .into_iter()
        .zip(questions)
        .filter(|(review, _)| !review.is_correct)
        .map(|(review, q)| WrongAnswer {
            question: review.question,
            student_answer: review
                .selected_answer_index
                .and_then(|i| q.options.get(i))
                .map_or_else(|| NOT_ANSWERED.to_string(), Clone::clone),
            correct_answer: q.correct_option().to_string(),
        })
        .collect()
}

/// Joins a stored result with the current questions of its course.
pub async fn report_for(state: &AppState, result: TestResult) -> ResultReport {
    let bank = state.questions.read().await;
    let questions = bank.get(&derive_key(&result.course)).unwrap_or_default();
    let review = build_review(&result, questions);
    ResultReport { result, review }
}

async fn own_result(state: &AppState, current: &CurrentUser) -> Option<TestResult> {
    state
        .results
        .read()
        .await
        .find(&current.identity.email, &current.identity.course)
        .cloned()
}

/// Profile of the logged-in user plus the result for their course, if any.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let result = own_result(&state, &current).await;
    Ok(Json(json!({
        "user": current.identity,
        "result": result,
    })))
}

/// Detailed report of the user's own result.
pub async fn get_my_result(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let result = own_result(&state, &current).await.ok_or(AppError::NotFound(
        "No test result found. You haven't taken the test for your selected course yet."
            .to_string(),
    ))?;

    Ok(Json(report_for(&state, result).await))
}

/// Asks the AI for study tips based on the questions the user got wrong.
///
/// Only the newest request per user may publish; an older response that
/// arrives late is answered with 409 Conflict.
pub async fn generate_study_tips(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let result = own_result(&state, &current).await.ok_or(AppError::NotFound(
        "Take the test first to get study tips.".to_string(),
    ))?;

    let mistakes = {
        let bank = state.questions.read().await;
        let questions = bank.get(&derive_key(&result.course)).ok_or(AppError::NotFound(
            "Could not find questions for this course to generate tips.".to_string(),
        ))?;
        wrong_answers(&result, questions)
    };

    let view = format!("study-tips:{}", current.identity.email);
    let ticket = state.sequencer.lock().await.issue(&view);

    let tips = if mistakes.is_empty() {
        ALL_CORRECT_TIPS.to_string()
    } else {
        match state.advisor.study_tips(&result.course, &mistakes).await {
            Ok(tips) => tips,
            Err(e) => {
                tracing::error!("Study tips failed: {:?}", e);
                state.sequencer.lock().await.retire(&ticket);
                return Err(e);
            }
        }
    };

    if !state.sequencer.lock().await.publish(&ticket, tips.clone()) {
        return Err(AppError::Conflict(
            "Superseded by a newer study tips request.".to_string(),
        ));
    }

    Ok(Json(json!({
        "tips": tips,
        "html": render_rich_text(&tips),
    })))
}

/// The study tips most recently published for this user.
pub async fn get_study_tips(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let view = format!("study-tips:{}", current.identity.email);
    let sequencer = state.sequencer.lock().await;
    let tips = sequencer
        .published(&view)
        .ok_or(AppError::NotFound("No study tips generated yet.".to_string()))?;

    Ok(Json(json!({
        "tips": tips,
        "html": render_rich_text(tips),
    })))
}
