// src/store/mod.rs

//! Process-wide in-memory stores. Each is a plain owned container;
//! `AppState` wraps them in locks and injects them into handlers.

pub mod catalog;
pub mod identity;
pub mod question_bank;
pub mod results;
pub mod sessions;

pub use catalog::CourseCatalog;
pub use identity::IdentityStore;
pub use question_bank::QuestionBank;
pub use results::ResultsStore;
pub use sessions::SessionStore;
