//! Per-item validation of recovered quiz entries.
//!
//! Each raw entry is decoded into a `QuizItem` and then run through the
//! policy's rule list. Entries failing any step are dropped and logged; a
//! malformed record never leaves the synthesizer.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::quiz::models::QuizItem;

pub const OPTIONS_PER_ITEM: usize = 4;

#[derive(Debug, Error)]
pub enum ItemDefect {
    #[error("does not decode as a quiz item: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("has {0} options, expected {}", OPTIONS_PER_ITEM)]
    OptionCount(usize),

    #[error("has an empty question")]
    EmptyQuestion,

    #[error("answer is not one of the options")]
    AnswerNotInOptions,
}

type ItemRule = fn(&QuizItem) -> Result<(), ItemDefect>;

/// Which rules apply beyond decoding. New rules go into `rules()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPolicy {
    pub strict_answers: bool,
}

impl ItemPolicy {
    fn rules(&self) -> Vec<ItemRule> {
        let mut rules: Vec<ItemRule> = vec![require_question, require_option_count];
        if self.strict_answers {
            rules.push(require_answer_in_options);
        }
        rules
    }

    /// Decodes and checks one entry.
    pub fn check(&self, raw: Value) -> Result<QuizItem, ItemDefect> {
        let item: QuizItem = serde_json::from_value(raw)?;
        for rule in self.rules() {
            rule(&item)?;
        }
        Ok(item)
    }

    /// Keeps the entries that pass, in order.
    pub fn filter_items(&self, raw_items: Vec<Value>) -> Vec<QuizItem> {
        raw_items
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match self.check(raw) {
                Ok(item) => Some(item),
                Err(defect) => {
                    warn!("Dropping quiz item #{index}: {defect}");
                    None
                }
            })
            .collect()
    }
}

fn require_question(item: &QuizItem) -> Result<(), ItemDefect> {
    if item.question.trim().is_empty() {
        return Err(ItemDefect::EmptyQuestion);
    }
    Ok(())
}

fn require_option_count(item: &QuizItem) -> Result<(), ItemDefect> {
    if item.options.len() != OPTIONS_PER_ITEM {
        return Err(ItemDefect::OptionCount(item.options.len()));
    }
    Ok(())
}

fn require_answer_in_options(item: &QuizItem) -> Result<(), ItemDefect> {
    let answer = item.answer.trim();
    if item.options.iter().any(|o| o.trim() == answer) {
        Ok(())
    } else {
        Err(ItemDefect::AnswerNotInOptions)
    }
}
