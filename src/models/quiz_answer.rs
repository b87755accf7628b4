// src/models/quiz_answer.rs

use sqlx::FromRow;

use crate::models::{quiz::Quiz, user::User};

/// Represents the 'quiz_answers' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAnswerRecord {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub answer_date: Option<chrono::DateTime<chrono::Utc>>,
    pub completed: bool,
}

/// A quiz answer with its associations.
///
/// `quiz` and `user` are `None` until the loader has fetched them; nothing
/// fetches them on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizAnswer {
    /// `None` until the answer has been persisted.
    pub id: Option<i64>,
    pub answer_date: Option<chrono::DateTime<chrono::Utc>>,
    pub completed: bool,
    pub quiz: Option<Quiz>,
    pub user: Option<User>,
}

impl From<QuizAnswerRecord> for QuizAnswer {
    fn from(record: QuizAnswerRecord) -> Self {
        Self {
            id: Some(record.id),
            answer_date: record.answer_date,
            completed: record.completed,
            quiz: None,
            user: None,
        }
    }
}
