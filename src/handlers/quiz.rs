// src/handlers/quiz.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    dto::{ProjectionMode, QuizSummary},
    error::AppError,
    models::{question::Question, quiz::Quiz},
    utils::extract::{Path, Query},
};

/// Query parameters for fetching a quiz.
#[derive(Debug, Deserialize)]
pub struct QuizParams {
    /// Defaults to `shallow`.
    pub mode: Option<ProjectionMode>,
}

/// Loads a quiz with its questions (ordered by sequence) and answer count.
///
/// Returns `Ok(None)` if the quiz does not exist.
pub(crate) async fn load_quiz(pool: &PgPool, id: i64) -> Result<Option<Quiz>, sqlx::Error> {
    let quiz = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT
            q.id,
            q.title,
            q.quiz_type,
            q.scramble,
            q.series,
            q.version,
            q.creation_date,
            q.available_date,
            q.conclusion_date,
            (SELECT COUNT(*) FROM quiz_answers a WHERE a.quiz_id = q.id) AS number_of_answers
        FROM quizzes q
        WHERE q.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(mut quiz) = quiz else {
        return Ok(None);
    };

    quiz.questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, sequence, title, content, options, answer
        FROM questions
        WHERE quiz_id = $1
        ORDER BY sequence
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(quiz))
}

/// Retrieves a single quiz projection by ID.
///
/// `?mode=detailed` expands the questions; answer keys are never included.
pub async fn get_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Query(params): Query<QuizParams>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = load_quiz(&pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let summary = QuizSummary::new(&quiz, params.mode.unwrap_or_default());
    tracing::debug!("Serving {}", summary.diagnostic_string());

    Ok(Json(summary))
}
