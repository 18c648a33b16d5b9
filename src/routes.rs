// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, advice, auth, courses, profile, quiz},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public: catalog, registration, login and career advice.
/// * Session-protected: logout, the test runner and the student's own profile.
/// * Admin: catalog, question bank, directory and results management.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let require_session = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/logout", post(auth::logout))
                .layer(require_session.clone()),
        );

    let course_routes = Router::new().route("/", get(courses::list_courses));

    let advice_routes = Router::new().route("/career", post(advice::career_advice));

    let quiz_routes = Router::new()
        .route("/", get(quiz::get_quiz))
        .route("/instructions", post(quiz::show_instructions))
        .route("/start", post(quiz::start))
        .route("/answer", post(quiz::answer))
        .route("/next", post(quiz::next))
        .route("/previous", post(quiz::previous))
        .route("/finish", post(quiz::finish))
        .layer(require_session.clone());

    let me_routes = Router::new()
        .route("/", get(profile::get_me))
        .route("/result", get(profile::get_my_result))
        .route(
            "/study-tips",
            get(profile::get_study_tips).post(profile::generate_study_tips),
        )
        .layer(require_session.clone());

    let admin_routes = Router::new()
        .route("/courses", post(admin::create_course))
        .route("/questions/template", get(admin::csv_template))
        .route(
            "/questions/{key}",
            get(admin::list_questions).post(admin::create_question),
        )
        .route("/questions/{key}/import", post(admin::import_questions))
        .route("/questions/{key}/generate", post(admin::generate_questions))
        .route("/questions/{key}/{index}", delete(admin::delete_question))
        .route("/users", get(admin::list_users).post(admin::create_admin))
        .route("/results", get(admin::list_results))
        .route("/results/{id}", get(admin::get_result))
        .route("/stats", get(admin::stats))
        // Auth runs first, then the admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_session);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/courses", course_routes)
        .nest("/api/advice", advice_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/me", me_routes)
        .nest("/api/admin", admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
