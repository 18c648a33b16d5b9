// src/services/mod.rs

pub mod advisor;
pub mod question_import;
pub mod sequencer;
