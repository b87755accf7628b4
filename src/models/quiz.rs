// src/models/quiz.rs

use sqlx::FromRow;

use crate::models::question::Question;

/// Represents the 'quizzes' table in the database, together with its questions.
///
/// `number_of_answers` is not a column; loaders compute it with a subquery
/// over `quiz_answers`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Quiz {
    pub id: i64,

    pub title: String,

    /// Quiz type: 'generated', 'proposed' or 'in_class'.
    pub quiz_type: String,

    /// Whether questions are shuffled for each student.
    pub scramble: bool,

    pub series: i32,

    pub version: Option<String>,

    pub creation_date: Option<chrono::DateTime<chrono::Utc>>,
    pub available_date: Option<chrono::DateTime<chrono::Utc>>,
    pub conclusion_date: Option<chrono::DateTime<chrono::Utc>>,

    pub number_of_answers: i64,

    /// Filled by a second query, ordered by `sequence`.
    #[sqlx(skip)]
    pub questions: Vec<Question>,
}
