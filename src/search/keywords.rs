// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Keyword extraction from claim text
//!
//! Turns free text into a compact search query: word-boundary tokenization,
//! alphabetic tokens only, English stop words removed. Token order is the
//! order of appearance in the claim and is never changed, because it shapes
//! the query string and therefore the search ranking.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// English stop words (alphabetic entries of the NLTK English list).
///
/// Contractions such as "don't" are absent: tokens containing an apostrophe
/// are split before the stop-word check, so only their alphabetic stems can
/// ever be compared.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Ordered keyword tokens derived from a single claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    tokens: Vec<String>,
}

impl Query {
    /// Build a query from claim text
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: extract_keywords(text),
        }
    }

    /// Wrap already-extracted tokens
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces, as sent to the search engine
    pub fn as_search_string(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// Extract search keywords from free text
///
/// # Example
/// ```
/// use factcheck_node::search::keywords::extract_keywords;
///
/// let tokens = extract_keywords("The GST on students' fees rose 28%!");
/// assert_eq!(tokens, vec!["GST", "students", "fees", "rose"]);
/// ```
pub fn extract_keywords(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| token.chars().all(char::is_alphabetic))
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Case-insensitive stop-word check
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token.to_lowercase().as_str())
}

/// Split text on word boundaries
///
/// Letters, digits, apostrophes and inner hyphens belong to a word; anything
/// else is a boundary. Surrounding apostrophes and hyphens are trimmed
/// (`students'` → `students`). A word with an inner apostrophe keeps only its
/// stem (`John's` → `John`, `don't` → `do`); hyphenated words stay whole and
/// are later rejected as non-alphabetic.
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .map(|raw| raw.trim_matches(|c: char| is_apostrophe(c) || c == '-'))
        .filter(|word| !word.is_empty())
        .map(split_contraction)
        .filter(|word| !word.is_empty())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || is_apostrophe(c)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn split_contraction(word: &str) -> &str {
    let Some(pos) = word.find(is_apostrophe) else {
        return word;
    };
    let stem = &word[..pos];
    let suffix = word[pos..].trim_start_matches(is_apostrophe);
    // "n't" contractions attach the n to the suffix: "didn't" → "did"
    if suffix.eq_ignore_ascii_case("t") && stem.len() > 1 && stem.ends_with(['n', 'N']) {
        &stem[..stem.len() - 1]
    } else {
        stem
    }
}
