//! Content Extractor — turns an encyclopedia article URL into a bounded,
//! information-dense text sample.
//!
//! Flow: validate_source → fetch → parse_article
//!   parse_article: title → qualifying paragraphs → summary → content sample → sections
//!
//! The content sample is a greedy prefix of whole paragraphs, so it never ends
//! mid-sentence. The one exception is a lead paragraph over budget with no
//! sentence end inside it, which is cut at a word boundary.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use super::fetcher::PageFetcher;
use super::normalize::normalize;
use super::ExtractionError;

/// Character budget for the content sample handed to the generator.
pub const MAX_CHARS: usize = 4000;
/// Paragraphs at or below this many characters are captions or fragments.
pub const MIN_PARAGRAPH_CHARS: usize = 60;
pub const FALLBACK_TITLE: &str = "Unknown Title";

const ENCYCLOPEDIA_DOMAIN: &str = "wikipedia.org";
const SUMMARY_PARAGRAPHS: usize = 2;

/// Result of one extraction. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub summary: String,
    pub sections: Vec<String>,
    pub content: String,
}

/// Fetches and extracts an article. Extraction failures are never retried.
pub async fn extract(
    fetcher: &dyn PageFetcher,
    raw_url: &str,
) -> Result<ExtractedPage, ExtractionError> {
    let url = validate_source(raw_url)?;
    let html = fetcher.fetch(&url).await?;
    let page = parse_article(&html)?;

    info!(
        "Extracted '{}' from {}: {} chars of content, {} sections",
        page.title,
        url,
        page.content.chars().count(),
        page.sections.len()
    );
    Ok(page)
}

/// Accepts only encyclopedia article URLs (any language/mobile subdomain).
/// Disambiguation pages are rejected.
pub fn validate_source(raw_url: &str) -> Result<Url, ExtractionError> {
    let url = Url::parse(raw_url.trim()).map_err(|e| {
        ExtractionError::InvalidSource(format!("'{raw_url}' is not a valid URL: {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExtractionError::InvalidSource(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let on_domain = host == ENCYCLOPEDIA_DOMAIN
        || host.ends_with(&format!(".{ENCYCLOPEDIA_DOMAIN}"));
    if !on_domain {
        return Err(ExtractionError::InvalidSource(
            "only Wikipedia URLs are supported".to_string(),
        ));
    }

    let path = url.path().to_ascii_lowercase();
    if path.contains("(disambiguation)") || path.contains("%28disambiguation%29") {
        return Err(ExtractionError::InvalidSource(
            "disambiguation pages are not supported".to_string(),
        ));
    }

    Ok(url)
}

/// Builds an `ExtractedPage` from raw article HTML.
pub fn parse_article(html: &str) -> Result<ExtractedPage, ExtractionError> {
    let document = Html::parse_document(html);

    let title = article_title(&document);
    let paragraphs = qualifying_paragraphs(&document);
    if paragraphs.is_empty() {
        return Err(ExtractionError::EmptyContent);
    }

    let summary = paragraphs
        .iter()
        .take(SUMMARY_PARAGRAPHS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let content = build_content_sample(&paragraphs, MAX_CHARS);
    let sections = section_headings(&document);

    debug!(
        "Article '{}': {} qualifying paragraphs",
        title,
        paragraphs.len()
    );

    Ok(ExtractedPage {
        title,
        summary,
        sections,
        content,
    })
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn article_title(document: &Html) -> String {
    document
        .select(&selector("h1"))
        .next()
        .map(|h1| element_text(h1).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Normalized body paragraphs in document order, minus pronunciation
/// paragraphs and anything too short to carry information.
fn qualifying_paragraphs(document: &Html) -> Vec<String> {
    let paragraph = selector("p");
    let pronunciation = selector("span.IPA");

    document
        .select(&paragraph)
        .filter(|p| p.select(&pronunciation).next().is_none())
        .map(|p| normalize(&element_text(p)))
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect()
}

/// Greedy whole-paragraph prefix that fits in `budget` characters,
/// space-separated. Stops at the first paragraph that would overflow.
fn build_content_sample(paragraphs: &[String], budget: usize) -> String {
    let mut sample = String::new();
    let mut used = 0usize;

    for paragraph in paragraphs {
        let separator = usize::from(!sample.is_empty());
        let len = paragraph.chars().count();
        if used + separator + len > budget {
            break;
        }
        if separator == 1 {
            sample.push(' ');
        }
        sample.push_str(paragraph);
        used += separator + len;
    }

    // A lead paragraph longer than the whole budget would leave nothing to quiz on.
    if sample.is_empty() {
        if let Some(first) = paragraphs.first() {
            return truncate_at_sentence(first, budget);
        }
    }

    sample.trim().to_string()
}

/// Cuts `text` to at most `budget` characters at the last sentence end,
/// or the last word boundary when no sentence ends inside the budget.
pub(crate) fn truncate_at_sentence(text: &str, budget: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= budget {
        return text.to_string();
    }

    let sentence_end = (0..budget).rev().find(|&i| {
        matches!(chars[i], '.' | '!' | '?')
            && chars.get(i + 1).map_or(true, |c| c.is_whitespace())
    });

    let cut = match sentence_end {
        Some(i) => i + 1,
        None => chars[..budget]
            .iter()
            .rposition(|c| c.is_whitespace())
            .unwrap_or(budget),
    };

    chars[..cut].iter().collect::<String>().trim_end().to_string()
}

/// Second-level headings. Classic markup wraps the label in
/// `span.mw-headline`; current markup puts it directly in the `h2`.
fn section_headings(document: &Html) -> Vec<String> {
    let classic: Vec<String> = document
        .select(&selector("h2 span.mw-headline"))
        .map(|span| normalize(&element_text(span)))
        .filter(|t| !t.is_empty())
        .collect();
    if !classic.is_empty() {
        return classic;
    }

    document
        .select(&selector(".mw-heading2 h2"))
        .map(|h2| normalize(&element_text(h2)))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticFetcher;

    /// A paragraph of exactly `len` characters ending in a full stop.
    fn paragraph_of(len: usize) -> String {
        format!("{}.", "a".repeat(len - 1))
    }

    fn page(body: &str) -> String {
        format!("<html><head><title>t</title></head><body>{body}</body></html>")
    }

    // ── source validation ────────────────────────────────────────────────

    #[test]
    fn test_accepts_language_and_mobile_subdomains() {
        for url in [
            "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            "https://de.m.wikipedia.org/wiki/Rost",
            "http://wikipedia.org/wiki/Iron",
        ] {
            assert!(validate_source(url).is_ok(), "rejected {url}");
        }
    }

    #[test]
    fn test_rejects_foreign_hosts() {
        for url in [
            "https://example.com/wiki/Rust",
            "https://notwikipedia.org/wiki/Rust",
            "https://wikipedia.org.evil.com/wiki/Rust",
        ] {
            assert!(
                matches!(validate_source(url), Err(ExtractionError::InvalidSource(_))),
                "accepted {url}"
            );
        }
    }

    #[test]
    fn test_rejects_disambiguation_case_insensitively() {
        for url in [
            "https://en.wikipedia.org/wiki/Mercury_(disambiguation)",
            "https://en.wikipedia.org/wiki/Mercury_(Disambiguation)",
            "https://en.wikipedia.org/wiki/Mercury_%28disambiguation%29",
        ] {
            assert!(
                matches!(validate_source(url), Err(ExtractionError::InvalidSource(_))),
                "accepted {url}"
            );
        }
    }

    #[test]
    fn test_rejects_garbage_and_non_http() {
        assert!(matches!(
            validate_source("not a url"),
            Err(ExtractionError::InvalidSource(_))
        ));
        assert!(matches!(
            validate_source("ftp://en.wikipedia.org/wiki/Rust"),
            Err(ExtractionError::InvalidSource(_))
        ));
    }

    // ── parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_short_paragraph_filtered_from_summary_and_content() {
        let long = paragraph_of(80);
        let short = paragraph_of(30);
        let html = page(&format!("<h1>Iron</h1><p>{long}</p><p>{short}</p>"));

        let extracted = parse_article(&html).unwrap();
        assert_eq!(extracted.title, "Iron");
        assert_eq!(extracted.summary, long);
        assert_eq!(extracted.content, long);
    }

    #[test]
    fn test_exactly_threshold_length_is_dropped() {
        let html = page(&format!(
            "<h1>x</h1><p>{}</p><p>{}</p>",
            paragraph_of(MIN_PARAGRAPH_CHARS),
            paragraph_of(MIN_PARAGRAPH_CHARS + 1)
        ));
        let extracted = parse_article(&html).unwrap();
        assert_eq!(extracted.content.chars().count(), MIN_PARAGRAPH_CHARS + 1);
    }

    #[test]
    fn test_no_qualifying_paragraph_is_empty_content() {
        let html = page("<h1>Stub</h1><p>Too short.</p><p></p>");
        assert!(matches!(
            parse_article(&html),
            Err(ExtractionError::EmptyContent)
        ));
    }

    #[test]
    fn test_missing_title_uses_fallback() {
        let html = page(&format!("<p>{}</p>", paragraph_of(100)));
        assert_eq!(parse_article(&html).unwrap().title, FALLBACK_TITLE);
    }

    #[test]
    fn test_pronunciation_paragraphs_are_skipped() {
        let pronounced = format!(
            "Iron (<span class=\"IPA\">/ˈaɪərn/</span>) {}",
            paragraph_of(90)
        );
        let plain = paragraph_of(70);
        let html = page(&format!("<h1>Iron</h1><p>{pronounced}</p><p>{plain}</p>"));

        let extracted = parse_article(&html).unwrap();
        assert_eq!(extracted.content, plain);
    }

    #[test]
    fn test_citations_and_whitespace_are_normalized() {
        let html = page(
            "<h1> Iron </h1><p>Iron is a chemical element.<sup>[1]</sup>\n  It has the symbol Fe \
             and atomic number 26.<sup>[2]</sup></p>",
        );
        let extracted = parse_article(&html).unwrap();
        assert_eq!(extracted.title, "Iron");
        assert_eq!(
            extracted.content,
            "Iron is a chemical element. It has the symbol Fe and atomic number 26."
        );
    }

    #[test]
    fn test_summary_joins_first_two_paragraphs() {
        let (a, b, c) = (paragraph_of(70), paragraph_of(75), paragraph_of(85));
        let html = page(&format!("<h1>x</h1><p>{a}</p><p>{b}</p><p>{c}</p>"));
        let extracted = parse_article(&html).unwrap();
        assert_eq!(extracted.summary, format!("{a} {b}"));
        assert!(extracted.content.starts_with(&extracted.summary));
    }

    #[test]
    fn test_content_is_whole_paragraph_prefix_within_budget() {
        let paragraphs: Vec<String> = (0..6).map(|_| paragraph_of(1000)).collect();
        let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        let extracted = parse_article(&page(&format!("<h1>x</h1>{body}"))).unwrap();

        // 1000 + 1 + 1000 + 1 + 1000 = 3002; a fourth would reach 4003.
        assert_eq!(extracted.content, paragraphs[..3].join(" "));
        assert!(extracted.content.chars().count() <= MAX_CHARS);
    }

    #[test]
    fn test_greedy_join_stops_at_first_overflow() {
        let paragraphs = vec![paragraph_of(3000), paragraph_of(1500), paragraph_of(100)];
        // The 100-char paragraph would fit but the sample is a prefix, not a packing.
        assert_eq!(build_content_sample(&paragraphs, MAX_CHARS), paragraphs[0]);
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        // 1999 characters each, roughly 4000 bytes each.
        let wide = format!("{}.", "é".repeat(1998));
        let paragraphs = vec![wide.clone(), wide.clone()];
        let sample = build_content_sample(&paragraphs, MAX_CHARS);
        assert_eq!(sample, format!("{wide} {wide}"));
        assert_eq!(sample.chars().count(), 3999);
    }

    #[test]
    fn test_oversized_lead_paragraph_cut_at_sentence_end() {
        let sentence = "Iron is the most common element on Earth by mass. ";
        let lead = sentence.repeat(100).trim_end().to_string();
        let sample = build_content_sample(&[lead], MAX_CHARS);

        assert!(!sample.is_empty());
        assert!(sample.chars().count() <= MAX_CHARS);
        assert!(sample.ends_with("by mass."));
    }

    #[test]
    fn test_oversized_lead_without_sentence_end_cut_at_word() {
        let lead = "word ".repeat(1000).trim_end().to_string();
        let html = page(&format!("<h1>x</h1><p>{lead}</p>"));
        let extracted = parse_article(&html).unwrap();

        assert!(extracted.content.chars().count() <= MAX_CHARS);
        assert!(extracted.content.ends_with(" word"));
        assert!(lead.starts_with(&extracted.content));
    }

    #[test]
    fn test_truncate_without_sentence_end_uses_word_boundary() {
        let text = "word ".repeat(20);
        let cut = truncate_at_sentence(text.trim_end(), 12);
        assert_eq!(cut, "word word");
    }

    #[test]
    fn test_sections_classic_markup() {
        let html = page(&format!(
            "<h1>x</h1><p>{}</p>\
             <h2><span class=\"mw-headline\" id=\"History\">History</span></h2>\
             <h2><span class=\"mw-headline\">Properties</span><span class=\"mw-editsection\">edit</span></h2>",
            paragraph_of(100)
        ));
        assert_eq!(
            parse_article(&html).unwrap().sections,
            vec!["History".to_string(), "Properties".to_string()]
        );
    }

    #[test]
    fn test_sections_current_markup_fallback() {
        let html = page(&format!(
            "<h1>x</h1><p>{}</p>\
             <div class=\"mw-heading mw-heading2\"><h2 id=\"Etymology\">Etymology</h2></div>\
             <div class=\"mw-heading mw-heading3\"><h3>Sub</h3></div>",
            paragraph_of(100)
        ));
        assert_eq!(
            parse_article(&html).unwrap().sections,
            vec!["Etymology".to_string()]
        );
    }

    // ── extract() ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_extract_success() {
        let html = page(&format!("<h1>Iron</h1><p>{}</p>", paragraph_of(120)));
        let fetcher = StaticFetcher::ok(html);
        let extracted = extract(&fetcher, "https://en.wikipedia.org/wiki/Iron")
            .await
            .unwrap();
        assert_eq!(extracted.title, "Iron");
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_invalid_source_never_fetches() {
        let fetcher = StaticFetcher::ok(String::new());
        let result = extract(&fetcher, "https://example.com/wiki/Iron").await;
        assert!(matches!(result, Err(ExtractionError::InvalidSource(_))));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_propagates_fetch_status() {
        let fetcher = StaticFetcher::failing(Some(404), "HTTP 404");
        let result = extract(&fetcher, "https://en.wikipedia.org/wiki/Nope").await;
        assert!(matches!(
            result,
            Err(ExtractionError::Fetch {
                status: Some(404),
                ..
            })
        ));
    }
}
