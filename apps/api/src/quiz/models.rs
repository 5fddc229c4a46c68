use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Easy", alias = "EASY")]
    Easy,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "Hard", alias = "HARD")]
    Hard,
}

/// One multiple-choice question. Built only by the synthesizer; everything
/// downstream treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Difficulty,
    pub explanation: String,
}

/// Output of one synthesis attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationBatch {
    pub quiz: Vec<QuizItem>,
    pub related_topics: Vec<String>,
}

/// Final orchestration output. `quiz.len()` may be below the requested count;
/// that shortfall is a legitimate outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz: Vec<QuizItem>,
    pub related_topics: Vec<String>,
    /// Synthesis attempts spent producing this result.
    #[serde(skip)]
    pub attempts: u32,
}
