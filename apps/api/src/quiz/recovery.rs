//! JSON Recovery — pulls the quiz payload out of free-form generator text.
//!
//! Generators wrap JSON in prose and code fences. After stripping fences, every
//! `{` is tried in order as the start of a balanced span (string- and
//! escape-aware); the first span that parses as an object wins. A prose brace
//! that never closes, or whose stray quote swallows what follows, only costs
//! its own start position. Trailing fragments after the object are ignored.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("no JSON object found in generator output")]
    NoJsonFound,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Shape-checked payload. `quiz` entries are still raw; per-item validation
/// happens in `validation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveredPayload {
    pub quiz: Vec<Value>,
    pub related_topics: Vec<String>,
}

/// Recovers the first JSON object in `text` and applies the shape contract.
pub fn recover(text: &str) -> Result<RecoveredPayload, RecoveryError> {
    let object = recover_object(text)?;
    Ok(shape_check(object))
}

/// Finds and parses the first well-formed JSON object in `text`.
pub fn recover_object(text: &str) -> Result<Map<String, Value>, RecoveryError> {
    let stripped = strip_code_fences(text);

    let mut first_error: Option<serde_json::Error> = None;
    for candidate in object_candidates(&stripped) {
        match serde_json::from_str::<Map<String, Value>>(candidate) {
            Ok(object) => return Ok(object),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(RecoveryError::MalformedJson(e)),
        None => Err(RecoveryError::NoJsonFound),
    }
}

/// Removes ```json / ``` fence markers wherever they appear.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
}

/// One candidate per `{`, in order. A candidate runs to its balanced `}`, or
/// to the end of the text when it never closes, so the parse error is kept.
fn object_candidates(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .map(move |(start, _)| match balanced_end(&text[start..]) {
            Some(len) => &text[start..start + len],
            None => &text[start..],
        })
}

/// Byte length of the balanced object at the start of `text` (which begins
/// with `{`), or `None` if it never closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// `quiz` and `related_topics` fall back to empty when absent or mis-shaped.
/// Non-string topics are dropped.
fn shape_check(mut object: Map<String, Value>) -> RecoveredPayload {
    let quiz = match object.remove("quiz") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    let related_topics = match object.remove("related_topics") {
        Some(Value::Array(topics)) => topics
            .into_iter()
            .filter_map(|t| match t {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    RecoveredPayload {
        quiz,
        related_topics,
    }
}
