// src/dto/mod.rs

//! Response projections of the domain aggregates.

pub mod answer_summary;
pub mod quiz_summary;

pub use answer_summary::AnswerSummary;
pub use quiz_summary::{ProjectionMode, QuestionSummary, QuizSummary};

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;

/// Renders an optional value for diagnostic strings, `null` when absent.
pub(crate) fn render_opt<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Renders an optional timestamp as RFC 3339, keeping any fractional seconds.
pub(crate) fn render_date(value: Option<&DateTime<Utc>>) -> String {
    render_opt(value.map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
}
