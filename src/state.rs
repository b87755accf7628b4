// src/state.rs

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::config::Config;

/// Shared state handed to every handler.
///
/// Handlers and middleware extract only the part they need
/// (`State<PgPool>`, `State<Config>`).
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
