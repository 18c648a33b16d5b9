// src/handlers/mod.rs

pub mod admin;
pub mod advice;
pub mod auth;
pub mod courses;
pub mod profile;
pub mod quiz;
