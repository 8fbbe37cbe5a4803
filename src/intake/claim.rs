// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The claim under check

use serde::{Deserialize, Serialize};

use crate::search::keywords::{extract_keywords, Query};

/// Where a claim's text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClaimOrigin {
    /// Typed or pasted by the user
    Text,
    /// OCR output of an uploaded image
    Image,
    /// Transcript of a YouTube video
    #[serde(rename_all = "camelCase")]
    Video { video_id: String },
}

/// Raw text whose veracity is being checked
///
/// Immutable once captured; lives for a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    text: String,
    origin: ClaimOrigin,
}

impl Claim {
    pub fn new(text: impl Into<String>, origin: ClaimOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// A claim typed by the user
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, ClaimOrigin::Text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &ClaimOrigin {
        &self.origin
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Keyword query for this claim
    pub fn query(&self) -> Query {
        Query::from_tokens(extract_keywords(&self.text))
    }

    /// First sentence of the claim, trimmed
    ///
    /// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
    /// the text. Text with no sentence end is returned whole.
    pub fn headline(&self) -> &str {
        let text = self.text.trim();
        let mut chars = text.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?') {
                let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
                if at_boundary {
                    return &text[..idx + c.len_utf8()];
                }
            }
        }
        text
    }
}
