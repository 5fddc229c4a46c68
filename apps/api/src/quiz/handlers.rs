//! Axum route handlers for the Quiz API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::quiz::models::QuizItem;
use crate::quiz::sessions::{decode_quiz, get_session, list_sessions, upsert_session};
use crate::state::AppState;

const DEFAULT_QUESTIONS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub url: String,
    pub num_questions: Option<usize>,
}

/// `quiz.len() < requested` is a partial result, not a failure.
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub sections: Vec<String>,
    pub requested: usize,
    pub quiz: Vec<QuizItem>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct QuizDetailResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub quiz: Vec<QuizItem>,
    pub related_topics: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/quizzes
///
/// Extract → generate up to `num_questions` items → upsert by URL.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>, AppError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let requested = request.num_questions.unwrap_or(DEFAULT_QUESTIONS);
    let max = state.config.max_questions;
    if requested == 0 || requested > max {
        return Err(AppError::Validation(format!(
            "num_questions must be between 1 and {max}"
        )));
    }

    let generated = state.quiz.generate(url, requested).await?;
    let row = upsert_session(&state.db, url, &generated.page, &generated.result).await?;

    Ok(Json(GenerateQuizResponse {
        id: row.id,
        url: row.url,
        title: row.title,
        summary: row.summary,
        sections: generated.page.sections,
        requested,
        quiz: generated.result.quiz,
        related_topics: generated.result.related_topics,
    }))
}

/// GET /api/v1/quizzes
pub async fn handle_list_quizzes(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuizSummary>>, AppError> {
    let rows = list_sessions(&state.db).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| QuizSummary {
                id: row.id,
                url: row.url,
                title: row.title,
                summary: row.summary,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect(),
    ))
}

/// GET /api/v1/quizzes/:id
pub async fn handle_get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizDetailResponse>, AppError> {
    let row = get_session(&state.db, id).await?;
    let stored = decode_quiz(&row)?;

    Ok(Json(QuizDetailResponse {
        id: row.id,
        url: row.url,
        title: row.title,
        summary: row.summary,
        quiz: stored.quiz,
        related_topics: stored.related_topics,
    }))
}
