// src/models/question.rs

use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table in the database.
///
/// Every question belongs to exactly one quiz and keeps its position in it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Question {
    pub id: i64,

    pub quiz_id: i64,

    /// 1-based position of the question inside its quiz.
    pub sequence: i32,

    pub title: String,

    /// The text content of the question.
    pub content: String,

    /// List of options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// The correct answer key. Never leaves the service.
    pub answer: String,
}
