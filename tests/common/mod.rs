// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use portal::{
    config::Config,
    error::AppError,
    routes,
    services::advisor::{Advisor, WrongAnswer},
    state::AppState,
};
use url::Url;

pub const ADMIN_EMAIL: &str = "admin@portal.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Canned AI service. `questions` is returned verbatim for generation requests.
pub struct FakeAdvisor {
    pub questions: String,
}

#[async_trait]
impl Advisor for FakeAdvisor {
    async fn request_questions(&self, _course_name: &str, _count: u32) -> Result<String, AppError> {
        Ok(self.questions.clone())
    }

    async fn career_advice(&self, query: &str) -> Result<String, AppError> {
        Ok(format!("**Start here**\nYou asked: {}", query))
    }

    async fn study_tips(&self, course_name: &str, mistakes: &[WrongAnswer]) -> Result<String, AppError> {
        Ok(format!("Review {} topics from {}.", mistakes.len(), course_name))
    }
}

pub const VALID_AI_QUESTIONS: &str = r#"[
    {"question":"Generated 1","options":["a","b","c","d"],"correctAnswerIndex":1},
    {"question":"Generated 2","options":["a","b","c","d"],"correctAnswerIndex":2}
]"#;

/// Spawns the app on a random port and returns its base URL.
pub async fn spawn_app() -> String {
    spawn_app_with(VALID_AI_QUESTIONS).await
}

pub async fn spawn_app_with(ai_questions: &str) -> String {
    spawn_app_with_config(test_config(), ai_questions).await
}

pub fn test_config() -> Config {
    Config {
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        gemini_api_key: None,
        gemini_model: "test-model".to_string(),
        gemini_base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
        quiz_loading_delay_ms: 0,
    }
}

pub async fn spawn_app_with_config(config: Config, ai_questions: &str) -> String {
    let advisor = Arc::new(FakeAdvisor {
        questions: ai_questions.to_string(),
    });
    let state = AppState::new(config, advisor).expect("Failed to build state");
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub fn registration(email: &str, course: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Asha Rao",
        "email": email,
        "phone": "5550100",
        "fullAddress": "12 Lake Road",
        "dob": "1998-04-02",
        "gender": "Female",
        "qualification": "B.Com",
        "passingYear": "2020",
        "course": course,
        "password": "password123",
        "confirmPassword": "password123"
    })
}

pub fn unique_email() -> String {
    format!("s_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

pub async fn login(client: &reqwest::Client, address: &str, email: &str, password: &str) -> String {
    let body: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    body["token"].as_str().expect("Token not found").to_string()
}

pub async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    login(client, address, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Registers a student for `course` and returns a session token.
pub async fn student_token(client: &reqwest::Client, address: &str, course: &str) -> String {
    let email = unique_email();
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&registration(&email, course))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);

    login(client, address, &email, "password123").await
}
