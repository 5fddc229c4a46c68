// Content extraction: encyclopedia article URL → ExtractedPage.
// Network access goes through the PageFetcher trait; parsing is pure.

pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod normalize;

use thiserror::Error;

pub use extractor::{extract, ExtractedPage};
pub use fetcher::{HttpPageFetcher, PageFetcher};

/// Extraction failures. None of these are retried: the source itself is the problem.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("failed to fetch page{}: {message}", status_suffix(.status))]
    Fetch { status: Option<u16>, message: String },

    #[error("no readable content found")]
    EmptyContent,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}
