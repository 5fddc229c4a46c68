//! Axum route handlers for article preview.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub title: String,
    pub summary: String,
    pub sections: Vec<String>,
}

/// POST /api/v1/preview
///
/// Extracts the article without generating anything, so the client can show
/// what a quiz would be built from.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let page = state.quiz.preview(&request.url).await?;

    Ok(Json(PreviewResponse {
        title: page.title,
        summary: page.summary,
        sections: page.sections,
    }))
}
