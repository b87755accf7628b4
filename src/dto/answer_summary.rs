// src/dto/answer_summary.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    dto::{
        render_date, render_opt,
        quiz_summary::{ProjectionMode, QuizSummary},
    },
    error::AppError,
    models::quiz_answer::QuizAnswer,
};

/// Snapshot of one quiz answer as sent to clients.
///
/// Built once from a loaded [`QuizAnswer`] and never updated from it again.
/// The owning user is copied by name only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummary {
    id: Option<i64>,
    answer_date: Option<DateTime<Utc>>,
    completed: bool,
    quiz: Option<QuizSummary>,
    username: Option<String>,
}

impl AnswerSummary {
    /// Copies `answer` into a summary. The quiz is always projected shallow.
    ///
    /// Fails with [`AppError::MissingAssociation`] if the quiz or the user was
    /// not loaded; the username is never defaulted.
    pub fn from_answer(answer: &QuizAnswer) -> Result<Self, AppError> {
        let quiz = answer
            .quiz
            .as_ref()
            .ok_or_else(|| AppError::MissingAssociation("quiz".to_string()))?;
        let user = answer
            .user
            .as_ref()
            .ok_or_else(|| AppError::MissingAssociation("user".to_string()))?;

        Ok(Self {
            id: answer.id,
            answer_date: answer.answer_date,
            completed: answer.completed,
            quiz: Some(QuizSummary::new(quiz, ProjectionMode::Shallow)),
            username: Some(user.username.clone()),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn answer_date(&self) -> Option<DateTime<Utc>> {
        self.answer_date
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn quiz(&self) -> Option<&QuizSummary> {
        self.quiz.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    pub fn with_answer_date(mut self, answer_date: Option<DateTime<Utc>>) -> Self {
        self.answer_date = answer_date;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_quiz(mut self, quiz: Option<QuizSummary>) -> Self {
        self.quiz = quiz;
        self
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn set_answer_date(&mut self, answer_date: Option<DateTime<Utc>>) {
        self.answer_date = answer_date;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_quiz(&mut self, quiz: Option<QuizSummary>) {
        self.quiz = quiz;
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    /// Human-readable rendering for logs, fields in the order
    /// `id, answerDate, completed, quiz, username`. Not a stable format.
    pub fn diagnostic_string(&self) -> String {
        format!(
            "AnswerSummary{{id={}, answerDate={}, completed={}, quiz={}, username={}}}",
            render_opt(self.id),
            render_date(self.answer_date.as_ref()),
            self.completed,
            render_opt(self.quiz.as_ref().map(QuizSummary::diagnostic_string)),
            render_opt(self.username.as_ref().map(|name| format!("'{}'", name))),
        )
    }
}

impl TryFrom<&QuizAnswer> for AnswerSummary {
    type Error = AppError;

    fn try_from(answer: &QuizAnswer) -> Result<Self, Self::Error> {
        Self::from_answer(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{question::Question, quiz::Quiz, user::User};
    use chrono::{Duration, TimeZone};
    use sqlx::types::Json;

    fn answered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
    }

    fn quiz() -> Quiz {
        Quiz {
            id: 4,
            title: "Databases".to_string(),
            quiz_type: "proposed".to_string(),
            scramble: false,
            series: 2,
            version: None,
            creation_date: None,
            available_date: None,
            conclusion_date: None,
            number_of_answers: 1,
            questions: vec![Question {
                id: 40,
                quiz_id: 4,
                sequence: 1,
                title: "Joins".to_string(),
                content: "Which join keeps unmatched left rows?".to_string(),
                options: Json(vec!["INNER".to_string(), "LEFT".to_string()]),
                answer: "LEFT".to_string(),
            }],
        }
    }

    fn user() -> User {
        User {
            id: 9,
            username: "alice".to_string(),
            name: Some("Alice".to_string()),
            role: "student".to_string(),
            created_at: None,
        }
    }

    fn answer() -> QuizAnswer {
        QuizAnswer {
            id: Some(3),
            answer_date: Some(answered_at()),
            completed: true,
            quiz: Some(quiz()),
            user: Some(user()),
        }
    }

    #[test]
    fn test_from_answer_copies_fields() {
        let source = answer();
        let summary = AnswerSummary::from_answer(&source).unwrap();

        assert_eq!(summary.id(), Some(3));
        assert_eq!(summary.answer_date(), Some(answered_at()));
        assert!(summary.completed());
        assert_eq!(
            summary.quiz(),
            Some(&QuizSummary::new(&quiz(), ProjectionMode::Shallow))
        );
        assert_eq!(summary.username(), Some("alice"));
    }

    #[test]
    fn test_from_answer_projects_quiz_shallow() {
        let summary = AnswerSummary::try_from(&answer()).unwrap();
        let quiz = summary.quiz().unwrap();
        assert!(quiz.questions().is_empty());
        assert_eq!(quiz.number_of_questions(), 1);
    }

    #[test]
    fn test_from_unpersisted_answer_keeps_id_absent() {
        let source = QuizAnswer {
            id: None,
            answer_date: None,
            ..answer()
        };
        let summary = AnswerSummary::from_answer(&source).unwrap();
        assert_eq!(summary.id(), None);
        assert_eq!(summary.answer_date(), None);
    }

    #[test]
    fn test_missing_user_fails() {
        let source = QuizAnswer {
            user: None,
            ..answer()
        };
        let err = AnswerSummary::from_answer(&source).unwrap_err();
        assert!(matches!(err, AppError::MissingAssociation(ref name) if name == "user"));
    }

    #[test]
    fn test_missing_quiz_fails() {
        let source = QuizAnswer {
            quiz: None,
            ..answer()
        };
        let err = AnswerSummary::from_answer(&source).unwrap_err();
        assert!(matches!(err, AppError::MissingAssociation(ref name) if name == "quiz"));
    }

    #[test]
    fn test_default_is_empty() {
        let summary = AnswerSummary::default();
        assert_eq!(summary.id(), None);
        assert_eq!(summary.answer_date(), None);
        assert!(!summary.completed());
        assert!(summary.quiz().is_none());
        assert!(summary.username().is_none());
    }

    #[test]
    fn test_updaters_round_trip() {
        let quiz = QuizSummary::new(&quiz(), ProjectionMode::Shallow);
        let summary = AnswerSummary::default()
            .with_id(Some(12))
            .with_answer_date(Some(answered_at()))
            .with_completed(true)
            .with_quiz(Some(quiz.clone()))
            .with_username(Some("bob".to_string()));

        assert_eq!(summary.id(), Some(12));
        assert_eq!(summary.answer_date(), Some(answered_at()));
        assert!(summary.completed());
        assert_eq!(summary.quiz(), Some(&quiz));
        assert_eq!(summary.username(), Some("bob"));

        let mut summary = summary;
        summary.set_id(None);
        summary.set_answer_date(None);
        summary.set_completed(false);
        summary.set_quiz(None);
        summary.set_username(None);
        assert_eq!(summary, AnswerSummary::default());
    }

    #[test]
    fn test_snapshot_is_detached_from_source() {
        let mut source = answer();
        let summary = AnswerSummary::from_answer(&source).unwrap();

        if let Some(user) = source.user.as_mut() {
            user.username = "renamed".to_string();
        }
        source.completed = false;

        assert_eq!(summary.username(), Some("alice"));
        assert!(summary.completed());
    }

    #[test]
    fn test_json_shape() {
        let summary = AnswerSummary::from_answer(&answer()).unwrap();
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["answerDate"], "2024-03-01T10:30:00Z");
        assert_eq!(value["completed"], true);
        assert_eq!(value["quiz"]["id"], 4);
        assert_eq!(value["quiz"]["questions"], serde_json::json!([]));
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn test_diagnostic_string_field_order() {
        let summary = AnswerSummary::from_answer(&answer()).unwrap();
        let text = summary.diagnostic_string();

        assert!(text.starts_with(
            "AnswerSummary{id=3, answerDate=2024-03-01T10:30:00Z, completed=true, \
             quiz=QuizSummary{id=4"
        ));
        assert!(text.ends_with("}, username='alice'}"));
    }

    #[test]
    fn test_diagnostic_string_keeps_fractional_seconds() {
        let answered = answered_at() + Duration::microseconds(123_456);
        let summary = AnswerSummary::default().with_answer_date(Some(answered));

        assert!(
            summary
                .diagnostic_string()
                .contains("answerDate=2024-03-01T10:30:00.123456Z")
        );
    }

    #[test]
    fn test_diagnostic_string_of_default() {
        assert_eq!(
            AnswerSummary::default().diagnostic_string(),
            "AnswerSummary{id=null, answerDate=null, completed=false, quiz=null, username=null}"
        );
    }
}
