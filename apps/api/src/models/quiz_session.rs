use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct QuizSessionRow {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    /// `{"quiz": [...], "related_topics": [...]}`
    pub quiz_json: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
