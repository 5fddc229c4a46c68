// Quiz generation: recovery and validation of generator output, single-shot
// synthesis, and the bounded retry-until-quota orchestrator.
// All LLM calls go through the TextGenerator trait.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod recovery;
pub mod service;
pub mod sessions;
pub mod synthesizer;
pub mod validation;

use thiserror::Error;

pub use service::QuizService;
pub use synthesizer::{BatchSource, Synthesizer};

/// The one failure callers of synthesis see. Transport, recovery and schema
/// causes are folded into the message and logged, never matched on.
#[derive(Debug, Error)]
#[error("quiz generation failed: {0}")]
pub struct GenerationError(String);

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
