//! Quota Orchestrator — bounded retry-until-quota over a `BatchSource`.
//!
//! Each attempt asks only for the remaining deficit. Items accumulate in
//! order with no de-duplication; `related_topics` is last-writer-wins from the
//! latest successful attempt. A failed attempt still spends budget.

use tracing::{info, warn};

use crate::quiz::models::{QuizItem, QuizResult};
use crate::quiz::synthesizer::BatchSource;
use crate::quiz::GenerationError;

pub const MAX_ATTEMPTS: u32 = 3;

/// Runs attempts until `required` items exist or the budget is spent.
///
/// Returns exactly `required` items, or fewer when the generator never caught
/// up. Fails only when no item at all was produced.
pub async fn orchestrate(
    source: &dyn BatchSource,
    content: &str,
    required: usize,
) -> Result<QuizResult, GenerationError> {
    let mut accumulated: Vec<QuizItem> = Vec::with_capacity(required);
    let mut related_topics: Vec<String> = Vec::new();
    let mut attempts = 0u32;
    let mut last_error: Option<GenerationError> = None;

    while accumulated.len() < required && attempts < MAX_ATTEMPTS {
        let deficit = required - accumulated.len();
        attempts += 1;

        match source.synthesize(content, deficit).await {
            Ok(batch) => {
                info!(
                    "Attempt {}/{}: requested {}, received {}",
                    attempts,
                    MAX_ATTEMPTS,
                    deficit,
                    batch.quiz.len()
                );
                accumulated.extend(batch.quiz);
                related_topics = batch.related_topics;
            }
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempts, MAX_ATTEMPTS, e);
                last_error = Some(e);
            }
        }
    }

    if required > 0 && accumulated.is_empty() {
        let cause = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "generator returned no items".to_string());
        return Err(GenerationError::new(format!(
            "no quiz items after {attempts} attempts ({cause})"
        )));
    }

    accumulated.truncate(required);
    if accumulated.len() < required {
        warn!(
            "Quota not met: {} of {} items after {} attempts",
            accumulated.len(),
            required,
            attempts
        );
    }

    Ok(QuizResult {
        quiz: accumulated,
        related_topics,
        attempts,
    })
}
