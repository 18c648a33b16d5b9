// src/store/identity.rs

use chrono::Utc;

use crate::{
    error::AppError,
    models::user::{NewStudent, Role, User},
    utils::hash::verify_password,
};

/// User directory plus the built-in administrator.
///
/// The built-in administrator is never stored in the directory and is checked
/// first on login.
#[derive(Debug, Default)]
pub struct IdentityStore {
    bootstrap_admin: Option<User>,
    directory: Vec<User>,
}

impl IdentityStore {
    pub fn new(bootstrap_admin: Option<User>) -> Self {
        Self {
            bootstrap_admin,
            directory: Vec::new(),
        }
    }

    pub fn bootstrap_admin(&self) -> Option<&User> {
        self.bootstrap_admin.as_ref()
    }

    /// Registered users in registration order (the built-in admin excluded).
    pub fn users(&self) -> &[User] {
        &self.directory
    }

    pub fn students(&self) -> impl Iterator<Item = &User> {
        self.directory.iter().filter(|u| u.role == Role::Student)
    }

    /// Adds a student. Emails are not required to be unique; login resolves to
    /// the first matching entry.
    pub fn register(&mut self, profile: NewStudent) -> User {
        if self.directory.iter().any(|u| u.email == profile.email) {
            tracing::warn!("Registering duplicate email {}", profile.email);
        }

        let user = User {
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            full_address: profile.full_address,
            dob: profile.dob,
            gender: profile.gender,
            qualification: profile.qualification,
            passing_year: profile.passing_year,
            course: profile.course,
            password_hash: profile.password_hash,
            role: Role::Student,
            registration_date: Utc::now(),
        };
        self.directory.push(user.clone());
        user
    }

    /// Adds an administrator. Rejects emails already used in the directory or by
    /// the built-in administrator.
    pub fn create_admin(
        &mut self,
        name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<User, AppError> {
        if self.email_taken(email) {
            return Err(AppError::Conflict(
                "An account with this email already exists.".to_string(),
            ));
        }
        let admin = User::admin(name, email, password_hash);
        self.directory.push(admin.clone());
        Ok(admin)
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.bootstrap_admin.as_ref().is_some_and(|a| a.email == email)
            || self.directory.iter().any(|u| u.email == email)
    }

    /// Exact email match plus password verification. Built-in admin first,
    /// then the directory in order.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let candidates = self.bootstrap_admin.iter().chain(self.directory.iter());
        for user in candidates.filter(|u| u.email == email) {
            if verify_password(password, &user.password_hash)? {
                return Ok(user.clone());
            }
        }
        Err(AppError::InvalidCredentials)
    }

    /// First directory entry with this email, falling back to the built-in admin.
    pub fn find(&self, email: &str) -> Option<&User> {
        self.directory
            .iter()
            .find(|u| u.email == email)
            .or_else(|| self.bootstrap_admin.as_ref().filter(|a| a.email == email))
    }

    /// Case-insensitive search over name and email, optionally restricted to a role.
    pub fn search(&self, query: Option<&str>, role: Option<Role>) -> Vec<&User> {
        let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        self.directory
            .iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash::hash_password;

    fn student(email: &str, password: &str) -> NewStudent {
        NewStudent {
            name: "Ravi".into(),
            email: email.into(),
            phone: "555".into(),
            full_address: "1 Road".into(),
            dob: "1999-05-05".into(),
            gender: "male".into(),
            qualification: "B.Tech".into(),
            passing_year: "2020".into(),
            course: "SAP Fiori/UI5 Development".into(),
            password_hash: hash_password(password).unwrap(),
        }
    }

    fn store_with_admin() -> IdentityStore {
        let hash = hash_password("admin-pass").unwrap();
        IdentityStore::new(Some(User::admin("Admin", "admin@example.com", hash)))
    }

    #[test]
    fn test_register_assigns_student_role() {
        let mut store = IdentityStore::default();
        let user = store.register(student("ravi@example.com", "password123"));
        assert_eq!(user.role, Role::Student);
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_login_checks_bootstrap_admin_first() {
        let store = store_with_admin();
        let user = store.login("admin@example.com", "admin-pass").unwrap();
        assert!(user.is_admin());
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let mut store = store_with_admin();
        store.register(student("ravi@example.com", "password123"));
        let err = store.login("ravi@example.com", "password124").unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        let err = store.login("nobody@example.com", "password123").unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_duplicate_emails_are_allowed_and_first_match_wins() {
        let mut store = IdentityStore::default();
        let mut first = student("dup@example.com", "password123");
        first.name = "First".into();
        let mut second = student("dup@example.com", "password123");
        second.name = "Second".into();
        store.register(first);
        store.register(second);

        assert_eq!(store.users().len(), 2);
        assert_eq!(store.login("dup@example.com", "password123").unwrap().name, "First");
    }

    #[test]
    fn test_create_admin_rejects_taken_email() {
        let mut store = store_with_admin();
        store.register(student("ravi@example.com", "password123"));

        let err = store
            .create_admin("Other", "admin@example.com", "h".into())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.create_admin("Other", "ravi@example.com", "h".into()).is_err());

        let admin = store
            .create_admin("Ops", "ops@example.com", hash_password("ops-pass").unwrap())
            .unwrap();
        assert_eq!(admin.course, "N/A");
        assert!(store.login("ops@example.com", "ops-pass").unwrap().is_admin());
    }

    #[test]
    fn test_search_by_text_and_role() {
        let mut store = IdentityStore::default();
        store.register(student("ravi@example.com", "password123"));
        store
            .create_admin("Ops", "ops@example.com", "h".into())
            .unwrap();

        assert_eq!(store.search(Some("RAVI"), None).len(), 1);
        assert_eq!(store.search(None, Some(Role::Admin)).len(), 1);
        assert_eq!(store.search(Some("example.com"), Some(Role::Student)).len(), 1);
        assert_eq!(store.students().count(), 1);
    }
}
