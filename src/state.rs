// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    error::AppError,
    models::user::User,
    quiz::host::QuizHost,
    seed,
    services::{advisor::Advisor, sequencer::RequestSequencer},
    store::{CourseCatalog, IdentityStore, QuestionBank, ResultsStore, SessionStore},
    utils::hash::hash_password,
};

/// Shared application state. Every store is owned here and handed to handlers
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<RwLock<CourseCatalog>>,
    pub identities: Arc<RwLock<IdentityStore>>,
    pub questions: Arc<RwLock<QuestionBank>>,
    pub results: Arc<RwLock<ResultsStore>>,
    pub sessions: Arc<RwLock<SessionStore>>,
    pub quizzes: Arc<Mutex<QuizHost>>,
    pub advisor: Arc<dyn Advisor>,
    /// Orders study tips requests, one view per user.
    pub sequencer: Arc<Mutex<RequestSequencer>>,
    /// Orders anonymous career advice requests by client view id.
    pub career_views: Arc<Mutex<RequestSequencer>>,
}

impl AppState {
    /// Builds the stores from seed data. The built-in admin is created when
    /// both admin credentials are configured.
    pub fn new(config: Config, advisor: Arc<dyn Advisor>) -> Result<Self, AppError> {
        let bootstrap_admin = match (&config.admin_email, &config.admin_password) {
            (Some(email), Some(password)) => {
                tracing::info!("Bootstrap admin configured: {}", email);
                Some(User::admin("Admin", email, hash_password(password)?))
            }
            _ => {
                tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, no built-in admin");
                None
            }
        };

        let courses = seed::initial_courses();
        let questions = QuestionBank::initialize(&courses);
        tracing::info!(
            "Seeded {} courses and {} questions",
            courses.len(),
            questions.total()
        );

        Ok(Self {
            config,
            catalog: Arc::new(RwLock::new(CourseCatalog::new(courses))),
            identities: Arc::new(RwLock::new(IdentityStore::new(bootstrap_admin))),
            questions: Arc::new(RwLock::new(questions)),
            results: Arc::new(RwLock::new(ResultsStore::default())),
            sessions: Arc::new(RwLock::new(SessionStore::default())),
            quizzes: Arc::new(Mutex::new(QuizHost::default())),
            advisor,
            sequencer: Arc::new(Mutex::new(RequestSequencer::default())),
            career_views: Arc::new(Mutex::new(RequestSequencer::default())),
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Advisor> {
    fn from_ref(state: &AppState) -> Self {
        state.advisor.clone()
    }
}
