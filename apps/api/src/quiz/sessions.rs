//! Quiz session persistence, keyed by article URL.

use anyhow::Context;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ExtractedPage;
use crate::models::quiz_session::QuizSessionRow;
use crate::quiz::models::QuizResult;

/// Inserts a session for `url`, or overwrites the existing one.
///
/// A single `ON CONFLICT` statement, so two concurrent requests for the same
/// URL resolve to one row: whichever lands second becomes an update.
pub async fn upsert_session(
    pool: &PgPool,
    url: &str,
    page: &ExtractedPage,
    result: &QuizResult,
) -> Result<QuizSessionRow, AppError> {
    let quiz_json = serde_json::to_value(result).context("Failed to serialize quiz result")?;

    let row = sqlx::query_as::<_, QuizSessionRow>(
        r#"
        INSERT INTO quiz_sessions (id, url, title, summary, quiz_json)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (url) DO UPDATE SET
            title = EXCLUDED.title,
            summary = EXCLUDED.summary,
            quiz_json = EXCLUDED.quiz_json,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(url)
    .bind(&page.title)
    .bind(&page.summary)
    .bind(&quiz_json)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved quiz session {} for {} ({} items)",
        row.id,
        row.url,
        result.quiz.len()
    );
    Ok(row)
}

/// All saved sessions, newest first.
pub async fn list_sessions(pool: &PgPool) -> Result<Vec<QuizSessionRow>, AppError> {
    Ok(sqlx::query_as::<_, QuizSessionRow>(
        "SELECT * FROM quiz_sessions ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_session(pool: &PgPool, id: Uuid) -> Result<QuizSessionRow, AppError> {
    sqlx::query_as::<_, QuizSessionRow>("SELECT * FROM quiz_sessions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz {id} not found")))
}

/// Decodes the stored `quiz_json` column.
pub fn decode_quiz(row: &QuizSessionRow) -> Result<QuizResult, AppError> {
    serde_json::from_value(row.quiz_json.clone())
        .with_context(|| format!("Stored quiz {} is not a valid quiz result", row.id))
        .map_err(AppError::Internal)
}
