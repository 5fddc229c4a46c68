use sqlx::PgPool;

use crate::config::Config;
use crate::quiz::QuizService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Extraction + generation, with the page fetcher and generator injected at startup.
    pub quiz: QuizService,
}
