// src/models/mod.rs

pub mod question;
pub mod quiz;
pub mod quiz_answer;
pub mod user;
