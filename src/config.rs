// src/config.rs

use std::env;
use dotenvy::dotenv;
use url::Url;

/// Length of a quiz attempt, in seconds (15 minutes).
pub const QUIZ_DURATION_SECS: u32 = 15 * 60;

/// Countdown shown on the result screen before redirecting to the dashboard.
pub const REDIRECT_COUNTDOWN_SECS: u32 = 30;

/// Discount granted for a perfect score, in percent.
pub const MAX_DISCOUNT_PERCENT: u32 = 75;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: String,

    /// Credentials of the built-in administrator. Not part of the user directory.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Url,

    /// Delay between loading a quiz and making it active.
    pub quiz_loading_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let gemini_base_url = Url::parse(&gemini_base_url)
            .expect("GEMINI_BASE_URL must be a valid URL");

        let quiz_loading_delay_ms = env::var("QUIZ_LOADING_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        Self {
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            gemini_base_url,
            quiz_loading_delay_ms,
        }
    }
}
