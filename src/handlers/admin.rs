// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::profile::report_for,
    models::{
        course::{Course, CourseView, CreateCourseRequest},
        question::{CreateQuestionRequest, GenerateQuestionsRequest, TestQuestion},
        test_result::DashboardStats,
        user::{CreateAdminRequest, User, UserListParams},
    },
    services::question_import::{self, CSV_TEMPLATE_FILENAME},
    state::AppState,
    utils::hash::hash_password,
};

/// Adds a new module to the catalog.
/// Admin only. A case-insensitive name collision is rejected with 409.
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let course = Course::new(
        payload.name.trim(),
        payload.course_type,
        payload.description.trim(),
    );
    let view = CourseView::from(&course);

    state
        .catalog
        .write()
        .await
        .add(course)
        .inspect_err(|e| tracing::warn!("Rejected course: {:?}", e))?;
    tracing::info!("Added course {} ({})", view.name, view.key);

    Ok((StatusCode::CREATED, Json(view)))
}

/// Resolves a course key to its catalog entry.
async fn course_for_key(state: &AppState, key: &str) -> Result<Course, AppError> {
    state
        .catalog
        .read()
        .await
        .find_by_key(key)
        .cloned()
        .ok_or(AppError::NotFound(format!("No course with key '{}'", key)))
}

/// Lists the questions of a course in quiz order.
/// Admin only.
pub async fn list_questions(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    course_for_key(&state, &key).await?;

    let bank = state.questions.read().await;
    let questions: Vec<TestQuestion> = bank.get(&key).unwrap_or_default().to_vec();

    Ok(Json(questions))
}

/// Appends a manually written question.
/// Admin only.
pub async fn create_question(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    course_for_key(&state, &key).await?;

    let question = TestQuestion::from(payload);
    state.questions.write().await.add(&key, question.clone());

    Ok((StatusCode::CREATED, Json(question)))
}

/// Deletes a question by position.
/// Admin only.
pub async fn delete_question(
    State(state): State<AppState>,
    Path((key, index)): Path<(String, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.questions.write().await.delete(&key, index)?;
    tracing::info!("Deleted question '{}' from {}", removed.question, key);

    Ok(StatusCode::NO_CONTENT)
}

/// Imports questions from an uploaded CSV body. Malformed lines are skipped.
/// Admin only.
pub async fn import_questions(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let course = course_for_key(&state, &key).await?;

    let parsed = question_import::parse_csv(&body);
    let added = parsed.len();
    state.questions.write().await.add_many(&key, parsed);
    tracing::info!("Imported {} questions into {}", added, course.name);

    Ok(Json(serde_json::json!({ "added": added })))
}

/// Generates questions with the AI service and appends them.
/// Admin only.
pub async fn generate_questions(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let course = course_for_key(&state, &key).await?;

    let generated =
        question_import::generate(state.advisor.as_ref(), &course.name, payload.count).await?;
    let added = generated.len();
    state.questions.write().await.add_many(&key, generated);
    tracing::info!("Added {} AI questions to {}", added, course.name);

    Ok(Json(serde_json::json!({ "added": added })))
}

/// Downloads the CSV import template.
pub async fn csv_template() -> Result<impl IntoResponse, AppError> {
    let body = question_import::csv_template()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_TEMPLATE_FILENAME),
            ),
        ],
        body,
    ))
}

/// Directory entry with the id of the user's result for their course.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    pub result_id: Option<Uuid>,
    pub score: Option<u32>,
    pub discount: Option<u32>,
}

/// Lists registered users with optional text search and role filter.
/// Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let identities = state.identities.read().await;
    let results = state.results.read().await;

    let users: Vec<UserSummary> = identities
        .search(params.q.as_deref(), params.role)
        .into_iter()
        .map(|user| {
            let result = results.find(&user.email, &user.course);
            UserSummary {
                user: user.clone(),
                result_id: result.map(|r| r.id),
                score: result.map(|r| r.score),
                discount: result.map(|r| r.discount),
            }
        })
        .collect();

    Ok(Json(users))
}

/// Creates another administrator.
/// Admin only.
pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let admin = state
        .identities
        .write()
        .await
        .create_admin(&payload.name, &payload.email, password_hash)?;
    tracing::info!("Created admin {}", admin.email);

    Ok((StatusCode::CREATED, Json(admin)))
}

/// All results, newest first.
/// Admin only.
pub async fn list_results(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let results = state.results.read().await;
    Ok(Json(results.recent(results.len())))
}

/// One result by its stable id, with the student's profile and answer review.
/// Admin only.
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .results
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(AppError::NotFound("Test result not found".to_string()))?;

    let user = state.identities.read().await.find(&result.user_email).cloned();
    let report = report_for(&state, result).await;

    Ok(Json(serde_json::json!({
        "user": user,
        "result": report.result,
        "review": report.review,
    })))
}

/// Counts, score distribution and recent activity for the dashboard.
/// Admin only.
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let courses = state.catalog.read().await.len();
    let questions = state.questions.read().await.total();
    let identities = state.identities.read().await;
    let results = state.results.read().await;

    let students: Vec<&User> = identities.students().collect();
    let recent_students = students.iter().rev().take(5).map(|u| (*u).clone()).collect();

    Ok(Json(DashboardStats {
        students: students.len(),
        courses,
        questions,
        results: results.len(),
        score_distribution: results.score_distribution(),
        recent_results: results.recent(5),
        recent_students,
    }))
}

