// src/models/user.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placeholder stored in profile fields that do not apply to administrators.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// A registered identity. Email is the identity key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub full_address: String,
    pub dob: String,
    pub gender: String,
    pub qualification: String,
    pub passing_year: String,

    /// Course chosen at registration.
    pub course: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub role: Role,
    pub registration_date: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Builds an administrator identity; profile fields are filled with [`NOT_APPLICABLE`].
    pub fn admin(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: NOT_APPLICABLE.to_string(),
            full_address: NOT_APPLICABLE.to_string(),
            dob: NOT_APPLICABLE.to_string(),
            gender: NOT_APPLICABLE.to_string(),
            qualification: NOT_APPLICABLE.to_string(),
            passing_year: NOT_APPLICABLE.to_string(),
            course: NOT_APPLICABLE.to_string(),
            password_hash,
            role: Role::Admin,
            registration_date: Utc::now(),
        }
    }
}

/// Student profile captured at registration, before a role and date are assigned.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub full_address: String,
    pub dob: String,
    pub gender: String,
    pub qualification: String,
    pub passing_year: String,
    pub course: String,
    pub password_hash: String,
}

/// DTO for student registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "All fields are required."))]
    pub name: String,
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "All fields are required."))]
    pub phone: String,
    #[validate(length(min = 1, max = 500, message = "All fields are required."))]
    pub full_address: String,
    #[validate(length(min = 1, max = 30, message = "All fields are required."))]
    pub dob: String,
    #[validate(length(min = 1, max = 30, message = "All fields are required."))]
    pub gender: String,
    #[validate(length(min = 1, max = 200, message = "All fields are required."))]
    pub qualification: String,
    #[validate(length(min = 1, max = 10, message = "All fields are required."))]
    pub passing_year: String,
    #[validate(length(min = 1, max = 200, message = "All fields are required."))]
    pub course: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be at least 8 characters long."
    ))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254, message = "Email and password are required."))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Email and password are required."))]
    pub password: String,
}

/// DTO for an administrator creating another administrator.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 100, message = "All fields are required."))]
    pub name: String,
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "All fields are required."))]
    pub password: String,
}

/// Query parameters for the admin user list.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub q: Option<String>,
    pub role: Option<Role>,
}
