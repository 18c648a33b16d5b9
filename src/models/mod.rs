// src/models/mod.rs

pub mod course;
pub mod question;
pub mod test_result;
pub mod user;
