//! Quiz Item Synthesizer — one generator call per invocation.
//!
//! Flow: build prompt → TextGenerator::complete (bounded) → recover JSON →
//!       validate items → truncate to the requested count.
//!
//! Every failure becomes the same `GenerationError`; the cause is only logged.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::extraction::extractor::{truncate_at_sentence, MAX_CHARS};
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::quiz::models::GenerationBatch;
use crate::quiz::prompts::{QUIZ_PROMPT_TEMPLATE, QUIZ_SYSTEM};
use crate::quiz::recovery::recover;
use crate::quiz::validation::ItemPolicy;
use crate::quiz::GenerationError;

/// Produces a best-effort batch of at most `count` items.
/// The orchestrator depends on this rather than on `Synthesizer` directly.
#[async_trait]
pub trait BatchSource: Send + Sync {
    async fn synthesize(
        &self,
        content: &str,
        count: usize,
    ) -> Result<GenerationBatch, GenerationError>;
}

pub struct Synthesizer {
    generator: Arc<dyn TextGenerator>,
    policy: ItemPolicy,
    timeout: Duration,
}

impl Synthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: ItemPolicy, timeout: Duration) -> Self {
        Self {
            generator,
            policy,
            timeout,
        }
    }
}

#[async_trait]
impl BatchSource for Synthesizer {
    async fn synthesize(
        &self,
        content: &str,
        count: usize,
    ) -> Result<GenerationBatch, GenerationError> {
        if count == 0 {
            return Err(GenerationError::new("requested zero quiz items"));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::new("no content to generate from"));
        }

        let prompt = build_quiz_prompt(content, count);

        let text = match tokio::time::timeout(
            self.timeout,
            self.generator.complete(QUIZ_SYSTEM, &prompt),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Generator call failed: {e}");
                return Err(GenerationError::new(format!("generator call failed: {e}")));
            }
            Err(_) => {
                warn!("Generator call timed out after {}s", self.timeout.as_secs());
                return Err(GenerationError::new("generator call timed out"));
            }
        };

        let payload = recover(&text).map_err(|e| {
            warn!(
                "Unrecoverable generator output ({e}): {:?}",
                text.chars().take(120).collect::<String>()
            );
            GenerationError::new(format!("unusable generator output: {e}"))
        })?;

        let offered = payload.quiz.len();
        let mut quiz = self.policy.filter_items(payload.quiz);
        quiz.truncate(count);

        debug!(
            "Synthesized {} of {} requested items ({} offered by generator)",
            quiz.len(),
            count,
            offered
        );

        Ok(GenerationBatch {
            quiz,
            related_topics: payload.related_topics,
        })
    }
}

/// Fills the template. Content is capped at the extraction budget.
fn build_quiz_prompt(content: &str, count: usize) -> String {
    let content = truncate_at_sentence(content, MAX_CHARS);
    QUIZ_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{count}", &count.to_string())
        .replace("{content}", &content)
}
