// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{TimeDelta, Utc};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, NewStudent, RegisterRequest, User},
    state::AppState,
    utils::{
        hash::hash_password,
        jwt::{CurrentUser, sign_jwt},
    },
};

/// Registers a new student.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if state.catalog.read().await.find_by_name(&payload.course).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown course '{}'. Please choose a course from the catalog.",
            payload.course
        )));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = state.identities.write().await.register(NewStudent {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        full_address: payload.full_address,
        dob: payload.dob,
        gender: payload.gender,
        qualification: payload.qualification,
        passing_year: payload.passing_year,
        course: payload.course,
        password_hash,
    });
    tracing::info!("Registered student {} for {}", user.email, user.course);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a bearer token for a new session.
///
/// The built-in admin is checked first, then the directory in order.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .identities
        .read()
        .await
        .login(&payload.email, &payload.password)
        .inspect_err(|_| tracing::info!("Failed login for {}", payload.email))?;

    let session_id = open_session(&state, user.clone()).await;
    let token = sign_jwt(
        session_id,
        &user,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "role": user.role,
        "name": user.name,
    })))
}

/// Opens a session for `user`, first purging sessions whose tokens have
/// expired together with their test runners.
async fn open_session(state: &AppState, user: User) -> Uuid {
    let ttl = i64::try_from(state.config.jwt_expiration)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);

    let (session_id, expired) = {
        let mut sessions = state.sessions.write().await;
        let expired = sessions.purge_expired(Utc::now(), ttl);
        (sessions.open(user), expired)
    };

    if !expired.is_empty() {
        tracing::info!("Purged {} expired sessions", expired.len());
        let mut quizzes = state.quizzes.lock().await;
        for id in expired {
            quizzes.remove(id);
        }
    }
    session_id
}

/// Ends the current session and discards its test runner.
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.write().await.close(current.session_id);
    state.quizzes.lock().await.remove(current.session_id);
    tracing::info!("{} logged out", current.identity.email);

    Ok(StatusCode::NO_CONTENT)
}
