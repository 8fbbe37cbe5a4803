// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content extraction
//!
//! Reduces a fetched page to a short, information-dense snippet built from
//! its headings and leading paragraphs.

use scraper::{ElementRef, Html, Selector};

/// Returned when a page has no usable headings or paragraphs
pub const NO_CONTENT_SENTINEL: &str = "No significant content found.";

/// Prefix of the sentinel returned when extraction itself fails
pub const EXTRACT_ERROR_PREFIX: &str = "Error: ";

/// Separator written after every heading
const HEADING_SEPARATOR: &str = " | ";

/// Paragraphs considered per page
const MAX_PARAGRAPHS: usize = 8;

/// Extract headings and leading paragraphs from HTML
///
/// Text of every `h1`/`h2`/`h3` in document order, each followed by `" | "`,
/// then the first eight `<p>` elements, each followed by a space. The result
/// is trimmed. Pages with nothing to offer yield [`NO_CONTENT_SENTINEL`];
/// selector failures yield a string starting with [`EXTRACT_ERROR_PREFIX`].
///
/// ```
/// use factcheck_node::search::content::extract_important_content;
///
/// let html = "<h1>GST rumour</h1><p>No such  rule.</p>";
/// assert_eq!(extract_important_content(html), "GST rumour | No such rule.");
/// ```
pub fn extract_important_content(html: &str) -> String {
    match try_extract(html) {
        Ok(content) if content.is_empty() => NO_CONTENT_SENTINEL.to_string(),
        Ok(content) => content,
        Err(reason) => format!("{}{}", EXTRACT_ERROR_PREFIX, reason),
    }
}

fn try_extract(html: &str) -> Result<String, String> {
    let document = Html::parse_document(html);
    let headings = Selector::parse("h1, h2, h3").map_err(|e| e.to_string())?;
    let paragraphs = Selector::parse("p").map_err(|e| e.to_string())?;

    // Blank headings and paragraphs contribute no separator, and element
    // text is whitespace-collapsed rather than only trimmed.
    let mut content = String::new();
    for heading in document.select(&headings) {
        let text = normalized_text(&heading);
        if !text.is_empty() {
            content.push_str(&text);
            content.push_str(HEADING_SEPARATOR);
        }
    }
    for paragraph in document.select(&paragraphs).take(MAX_PARAGRAPHS) {
        let text = normalized_text(&paragraph);
        if !text.is_empty() {
            content.push_str(&text);
            content.push(' ');
        }
    }

    Ok(content.trim().to_string())
}

/// All paragraph text of an article, joined by single spaces
///
/// Used when a whole article is summarised rather than corroborated.
pub fn extract_article_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let paragraphs = Selector::parse("p").ok()?;

    let text = document
        .select(&paragraphs)
        .map(|p| normalized_text(&p))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!text.is_empty()).then_some(text)
}

/// Whether extracted content is one of the reserved non-evidence strings
pub fn is_sentinel(content: &str) -> bool {
    content == NO_CONTENT_SENTINEL || content.starts_with(EXTRACT_ERROR_PREFIX)
}

/// Element text with whitespace runs collapsed to single spaces
fn normalized_text(element: &ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Clean text: normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
