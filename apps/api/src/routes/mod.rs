pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction_handlers;
use crate::quiz::handlers as quiz_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/preview", post(extraction_handlers::handle_preview))
        .route(
            "/api/v1/quizzes",
            post(quiz_handlers::handle_generate_quiz).get(quiz_handlers::handle_list_quizzes),
        )
        .route("/api/v1/quizzes/:id", get(quiz_handlers::handle_get_quiz))
        .with_state(state)
}
