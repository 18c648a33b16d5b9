// src/handlers/courses.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::course::{CourseType, CourseView},
    state::AppState,
};

/// Query parameters for listing courses.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub course_type: Option<CourseType>,
    pub q: Option<String>,
}

/// Lists the catalog, optionally filtered by track and search keyword.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read().await;
    let courses: Vec<CourseView> = catalog
        .filter(params.course_type, params.q.as_deref())
        .into_iter()
        .map(CourseView::from)
        .collect();

    Ok(Json(courses))
}
