//! Scripted stand-ins for the external collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::extraction::{ExtractionError, PageFetcher};
use crate::llm_client::{LlmError, TextGenerator};
use crate::quiz::models::{Difficulty, GenerationBatch, QuizItem};
use crate::quiz::{BatchSource, GenerationError};

pub fn sample_item(n: usize) -> QuizItem {
    QuizItem {
        question: format!("Question {n}?"),
        options: vec![
            format!("Option {n}A"),
            format!("Option {n}B"),
            format!("Option {n}C"),
            format!("Option {n}D"),
        ],
        answer: format!("Option {n}A"),
        difficulty: Difficulty::Medium,
        explanation: format!("Explanation {n}."),
    }
}

pub fn batch(range: std::ops::Range<usize>, topics: &[&str]) -> GenerationBatch {
    GenerationBatch {
        quiz: range.map(sample_item).collect(),
        related_topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

/// Returns one fixed response for every fetch and counts calls.
pub struct StaticFetcher {
    response: Result<String, (Option<u16>, String)>,
    pub calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn ok(html: impl Into<String>) -> Self {
        Self {
            response: Ok(html.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: Option<u16>, message: &str) -> Self {
        Self {
            response: Err((status, message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &Url) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(|(status, message)| ExtractionError::Fetch { status, message })
    }
}

/// Plays back batches in order and records the count requested each time.
/// Once the script runs out every call fails.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<GenerationBatch, GenerationError>>>,
    pub requested: Mutex<Vec<usize>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<GenerationBatch, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl BatchSource for ScriptedSource {
    async fn synthesize(
        &self,
        _content: &str,
        count: usize,
    ) -> Result<GenerationBatch, GenerationError> {
        self.requested.lock().unwrap().push(count);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::new("script exhausted")))
    }
}

/// Plays back raw generator text and keeps every prompt it was sent.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
