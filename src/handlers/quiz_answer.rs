// src/handlers/quiz_answer.rs

use std::collections::HashMap;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    dto::AnswerSummary,
    error::AppError,
    handlers::quiz::load_quiz,
    models::{
        quiz::Quiz,
        quiz_answer::{QuizAnswer, QuizAnswerRecord},
        user::User,
    },
    utils::{extract::Path, jwt::Claims},
};

/// Roles allowed to read other users' answers.
fn can_review(claims: &Claims) -> bool {
    matches!(claims.role.as_str(), "teacher" | "admin")
}

/// Loads the quiz and user of every record and builds the aggregates.
///
/// Each distinct quiz and user is fetched once. A record whose quiz or user
/// row is missing keeps that association `None`.
async fn assemble(
    pool: &PgPool,
    records: Vec<QuizAnswerRecord>,
) -> Result<Vec<QuizAnswer>, sqlx::Error> {
    let mut quizzes: HashMap<i64, Option<Quiz>> = HashMap::new();
    for record in &records {
        if !quizzes.contains_key(&record.quiz_id) {
            let quiz = load_quiz(pool, record.quiz_id).await?;
            quizzes.insert(record.quiz_id, quiz);
        }
    }

    let mut user_ids: Vec<i64> = records.iter().map(|r| r.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<i64, User> = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, role, created_at
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(&user_ids)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|u| (u.id, u))
    .collect();

    Ok(records
        .into_iter()
        .map(|record| {
            let quiz = quizzes.get(&record.quiz_id).cloned().flatten();
            let user = users.get(&record.user_id).cloned();
            QuizAnswer {
                quiz,
                user,
                ..QuizAnswer::from(record)
            }
        })
        .collect())
}

fn summarize(answers: &[QuizAnswer]) -> Result<Vec<AnswerSummary>, AppError> {
    answers.iter().map(AnswerSummary::from_answer).collect()
}

/// Retrieves a single quiz answer by ID.
///
/// Students only see their own answers; anything else is reported as not found.
pub async fn get_answer(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let record = sqlx::query_as::<_, QuizAnswerRecord>(
        r#"
        SELECT id, user_id, quiz_id, answer_date, completed
        FROM quiz_answers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz answer {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?
    .filter(|r| r.user_id == user_id || can_review(&claims))
    .ok_or(AppError::NotFound("Quiz answer not found".to_string()))?;

    let answers = assemble(&pool, vec![record]).await.map_err(|e| {
        tracing::error!("Failed to load quiz answer {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let answer = answers
        .first()
        .ok_or(AppError::NotFound("Quiz answer not found".to_string()))?;

    let summary = AnswerSummary::from_answer(answer)?;
    tracing::debug!("Serving {}", summary.diagnostic_string());

    Ok(Json(summary))
}

/// Lists the current user's quiz answers, newest first.
/// Answers that were never submitted sort last.
pub async fn list_my_answers(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let records = sqlx::query_as::<_, QuizAnswerRecord>(
        r#"
        SELECT id, user_id, quiz_id, answer_date, completed
        FROM quiz_answers
        WHERE user_id = $1
        ORDER BY answer_date DESC NULLS LAST, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch answers of user {}: {:?}", user_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let answers = assemble(&pool, records).await.map_err(|e| {
        tracing::error!("Failed to load answers of user {}: {:?}", user_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(summarize(&answers)?))
}

/// Lists every answer to one quiz. Teachers and admins only.
pub async fn list_quiz_answers(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !can_review(&claims) {
        return Err(AppError::Forbidden(
            "Only teachers can list quiz answers".to_string(),
        ));
    }

    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz {}: {:?}", quiz_id, e);
            AppError::InternalServerError(e.to_string())
        })?;
    if exists.is_none() {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    let records = sqlx::query_as::<_, QuizAnswerRecord>(
        r#"
        SELECT id, user_id, quiz_id, answer_date, completed
        FROM quiz_answers
        WHERE quiz_id = $1
        ORDER BY answer_date DESC NULLS LAST, id DESC
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch answers of quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let answers = assemble(&pool, records).await.map_err(|e| {
        tracing::error!("Failed to load answers of quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(summarize(&answers)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "1".to_string(),
            role: role.to_string(),
            exp: 0,
        }
    }

    #[test]
    fn test_only_staff_can_review() {
        assert!(can_review(&claims("teacher")));
        assert!(can_review(&claims("admin")));
        assert!(!can_review(&claims("student")));
    }

    #[test]
    fn test_summarize_stops_at_unloaded_user() {
        let answers = vec![QuizAnswer {
            id: Some(1),
            completed: true,
            quiz: Some(Quiz {
                id: 2,
                title: "Algebra".to_string(),
                quiz_type: "generated".to_string(),
                scramble: false,
                series: 1,
                version: None,
                creation_date: None,
                available_date: None,
                conclusion_date: None,
                number_of_answers: 1,
                questions: Vec::new(),
            }),
            ..QuizAnswer::default()
        }];

        assert!(matches!(
            summarize(&answers),
            Err(AppError::MissingAssociation(_))
        ));
    }
}
