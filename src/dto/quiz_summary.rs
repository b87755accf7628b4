// src/dto/quiz_summary.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    dto::{render_date, render_opt},
    models::{question::Question, quiz::Quiz},
};

/// How much of a quiz a projection expands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Quiz fields and counters only. Used wherever a quiz is nested in another summary.
    #[default]
    Shallow,
    /// Also expands the quiz's questions.
    Detailed,
}

/// Question as sent to clients. The answer key is never copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub sequence: i32,
    pub title: String,
    pub content: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionSummary {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            sequence: question.sequence,
            title: question.title.clone(),
            content: question.content.clone(),
            options: question.options.0.clone(),
        }
    }
}

/// Reduced projection of a [`Quiz`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    id: i64,
    title: String,
    quiz_type: String,
    scramble: bool,
    series: i32,
    version: Option<String>,
    creation_date: Option<DateTime<Utc>>,
    available_date: Option<DateTime<Utc>>,
    conclusion_date: Option<DateTime<Utc>>,
    number_of_questions: usize,
    number_of_answers: i64,
    mode: ProjectionMode,
    /// Empty unless built with [`ProjectionMode::Detailed`].
    questions: Vec<QuestionSummary>,
}

impl QuizSummary {
    pub fn new(quiz: &Quiz, mode: ProjectionMode) -> Self {
        let questions = match mode {
            ProjectionMode::Shallow => Vec::new(),
            ProjectionMode::Detailed => {
                quiz.questions.iter().map(QuestionSummary::from).collect()
            }
        };

        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            quiz_type: quiz.quiz_type.clone(),
            scramble: quiz.scramble,
            series: quiz.series,
            version: quiz.version.clone(),
            creation_date: quiz.creation_date,
            available_date: quiz.available_date,
            conclusion_date: quiz.conclusion_date,
            number_of_questions: quiz.questions.len(),
            number_of_answers: quiz.number_of_answers,
            mode,
            questions,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quiz_type(&self) -> &str {
        &self.quiz_type
    }

    pub fn scramble(&self) -> bool {
        self.scramble
    }

    pub fn series(&self) -> i32 {
        self.series
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    pub fn available_date(&self) -> Option<DateTime<Utc>> {
        self.available_date
    }

    pub fn conclusion_date(&self) -> Option<DateTime<Utc>> {
        self.conclusion_date
    }

    pub fn number_of_questions(&self) -> usize {
        self.number_of_questions
    }

    pub fn number_of_answers(&self) -> i64 {
        self.number_of_answers
    }

    pub fn questions(&self) -> &[QuestionSummary] {
        &self.questions
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// True when the projection was built with [`ProjectionMode::Detailed`],
    /// even if the quiz has no questions to expand.
    pub fn is_detailed(&self) -> bool {
        self.mode == ProjectionMode::Detailed
    }

    /// Human-readable rendering for logs. Not a stable format.
    pub fn diagnostic_string(&self) -> String {
        format!(
            "QuizSummary{{id={}, title='{}', quizType={}, scramble={}, series={}, version={}, \
             creationDate={}, availableDate={}, conclusionDate={}, numberOfQuestions={}, \
             numberOfAnswers={}, questions={}}}",
            self.id,
            self.title,
            self.quiz_type,
            self.scramble,
            self.series,
            render_opt(self.version.as_deref()),
            render_date(self.creation_date.as_ref()),
            render_date(self.available_date.as_ref()),
            render_date(self.conclusion_date.as_ref()),
            self.number_of_questions,
            self.number_of_answers,
            self.questions.len(),
        )
    }
}
