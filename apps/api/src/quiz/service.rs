//! `generate(url, n)` — the contract exposed to the routing layer.
//!
//! Flow: extract (fatal on failure) → orchestrate (retried internally) → result.
//! Persistence is left to the caller so a cancelled request stores nothing.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract, ExtractedPage, ExtractionError, PageFetcher};
use crate::quiz::models::QuizResult;
use crate::quiz::orchestrator::orchestrate;
use crate::quiz::synthesizer::BatchSource;
use crate::quiz::GenerationError;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Extraction(e) => e.into(),
            QuizError::Generation(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    pub page: ExtractedPage,
    pub result: QuizResult,
}

/// Owns the two collaborators a generation needs. Cheap to clone; each
/// request runs on its own local state.
#[derive(Clone)]
pub struct QuizService {
    fetcher: Arc<dyn PageFetcher>,
    source: Arc<dyn BatchSource>,
}

impl QuizService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, source: Arc<dyn BatchSource>) -> Self {
        Self { fetcher, source }
    }

    pub async fn preview(&self, url: &str) -> Result<ExtractedPage, QuizError> {
        Ok(extract(self.fetcher.as_ref(), url).await?)
    }

    pub async fn generate(
        &self,
        url: &str,
        num_questions: usize,
    ) -> Result<GeneratedQuiz, QuizError> {
        let page = extract(self.fetcher.as_ref(), url).await?;
        let result = orchestrate(self.source.as_ref(), &page.content, num_questions).await?;

        info!(
            "Generated {}/{} questions for '{}' in {} attempts",
            result.quiz.len(),
            num_questions,
            page.title,
            result.attempts
        );

        Ok(GeneratedQuiz { page, result })
    }
}
