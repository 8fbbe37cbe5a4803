// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence and corpus types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::search::content::{extract_important_content, is_sentinel, FetchStatus};

/// Content recorded for candidates whose page could not be fetched
pub const FETCH_FAILED_SENTINEL: &str = "Failed to fetch content";

/// Outcome of turning one candidate URL into evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvidenceStatus {
    Ok,
    NotFound,
    /// Fetched, but extraction produced nothing usable
    Empty,
    FetchError,
}

impl From<FetchStatus> for EvidenceStatus {
    fn from(status: FetchStatus) -> Self {
        match status {
            FetchStatus::Ok => Self::Ok,
            FetchStatus::NotFound => Self::NotFound,
            FetchStatus::FetchError => Self::FetchError,
        }
    }
}

/// One candidate's extracted content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub url: String,
    pub content: String,
    pub status: EvidenceStatus,
    /// 0-based position in the search results
    pub rank: usize,
}

impl EvidenceItem {
    /// Evidence from a fetched page body
    pub fn from_body(url: impl Into<String>, rank: usize, body: &str) -> Self {
        let content = extract_important_content(body);
        let status = if is_sentinel(&content) || content.trim().is_empty() {
            EvidenceStatus::Empty
        } else {
            EvidenceStatus::Ok
        };

        Self {
            url: url.into(),
            content,
            status,
            rank,
        }
    }

    /// Placeholder for a candidate whose page was not retrieved
    pub fn unfetched(url: impl Into<String>, rank: usize, status: EvidenceStatus) -> Self {
        Self {
            url: url.into(),
            content: FETCH_FAILED_SENTINEL.to_string(),
            status,
            rank,
        }
    }

    /// Whether this item may enter a corpus
    pub fn is_usable(&self) -> bool {
        self.status == EvidenceStatus::Ok
            && !self.content.trim().is_empty()
            && self.content != FETCH_FAILED_SENTINEL
            && !is_sentinel(&self.content)
    }
}

/// Ordered, filtered evidence for a single claim
///
/// Holds only usable items, in search-rank order, with no repeated URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    items: Vec<EvidenceItem>,
}

impl Corpus {
    /// Keep the usable items of `evidence`, first occurrence of a URL wins
    pub fn from_evidence(evidence: &[EvidenceItem]) -> Self {
        let mut seen = HashSet::new();
        let items = evidence
            .iter()
            .filter(|item| item.is_usable() && seen.insert(item.url.as_str()))
            .cloned()
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn urls(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.url.as_str()).collect()
    }

    /// Contents joined by newlines, cut to at most `max_chars` characters
    pub fn combined_text(&self, max_chars: usize) -> String {
        let joined = self
            .items
            .iter()
            .map(|i| i.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        match joined.char_indices().nth(max_chars) {
            Some((cut, _)) => joined[..cut].to_string(),
            None => joined,
        }
    }

    pub fn into_items(self) -> Vec<EvidenceItem> {
        self.items
    }
}

/// Everything one corpus-building run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusBuild {
    pub keywords: Vec<String>,
    /// Every candidate, usable or not, in rank order
    pub evidence: Vec<EvidenceItem>,
    pub corpus: Corpus,
    /// Where the audit table landed; `None` when not written
    pub audit_path: Option<PathBuf>,
    pub search_time_ms: u64,
    pub fetch_time_ms: u64,
}

impl CorpusBuild {
    /// A run that stopped before any candidate was fetched
    pub fn without_candidates(keywords: Vec<String>, search_time_ms: u64) -> Self {
        Self {
            keywords,
            search_time_ms,
            ..Self::default()
        }
    }

    pub fn has_evidence(&self) -> bool {
        !self.corpus.is_empty()
    }
}
