use std::sync::LazyLock;

use regex::Regex;

/// `[12]`-style citation markers.
static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("valid citation regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strips citation markers, collapses whitespace runs to one space, trims.
///
/// Idempotent. Markers are removed repeatedly until none remain, so text like
/// `[1[2]]` cannot reassemble into a fresh marker after one pass.
pub fn normalize(raw: &str) -> String {
    let mut text = CITATION_MARKER.replace_all(raw, "").into_owned();
    while CITATION_MARKER.is_match(&text) {
        text = CITATION_MARKER.replace_all(&text, "").into_owned();
    }
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}
