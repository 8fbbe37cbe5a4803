// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Corpus builder
//!
//! Orchestrates keyword extraction, search, fetch and extraction into a
//! deduplicated, filtered evidence set, and persists the audit table.

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::audit::write_audit_table;
use super::config::CorpusConfig;
use super::types::{Corpus, CorpusBuild, EvidenceItem, EvidenceStatus};
use crate::intake::Claim;
use crate::search::content::{FetchStatus, PageFetcher};
use crate::search::SearchService;

/// Builds the evidence corpus for a claim
pub struct CorpusBuilder {
    search: Arc<SearchService>,
    fetcher: Arc<dyn PageFetcher>,
    config: CorpusConfig,
    fetch_timeout: Duration,
}

impl CorpusBuilder {
    pub fn new(
        search: Arc<SearchService>,
        fetcher: Arc<dyn PageFetcher>,
        config: CorpusConfig,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            search,
            fetcher,
            config,
            fetch_timeout,
        }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Build a corpus, writing the audit table to the configured path
    pub async fn build(
        &self,
        claim: &Claim,
        candidates_limit: usize,
        cancel: &CancellationToken,
    ) -> CorpusBuild {
        self.build_with_audit(claim, candidates_limit, cancel, self.config.audit_path.as_deref())
            .await
    }

    /// Build a corpus, writing the audit table to `audit_path` when given
    ///
    /// Never fails: search failures give an empty corpus, per-candidate
    /// failures become unusable evidence rows, and cancellation or the run
    /// deadline turns outstanding candidates into `FetchError` rows.
    pub async fn build_with_audit(
        &self,
        claim: &Claim,
        candidates_limit: usize,
        cancel: &CancellationToken,
        audit_path: Option<&Path>,
    ) -> CorpusBuild {
        let stop = RunStop::new(cancel.clone(), self.config.run_deadline());
        let keywords = claim.query().into_tokens();

        if keywords.is_empty() {
            debug!("No keywords in claim, nothing to search");
            return CorpusBuild::without_candidates(keywords, 0);
        }

        if stop.is_stopped() {
            warn!("Run stopped before search");
            return CorpusBuild::without_candidates(keywords, 0);
        }

        let search_start = Instant::now();
        let candidates = tokio::select! {
            biased;
            _ = stop.wait() => {
                warn!("Run stopped during search");
                Vec::new()
            }
            urls = self.search.search_cancellable(&keywords, candidates_limit, cancel) => urls,
        };
        let search_time_ms = search_start.elapsed().as_millis() as u64;

        if candidates.is_empty() {
            info!("No candidates for query '{}'", keywords.join(" "));
            return CorpusBuild::without_candidates(keywords, search_time_ms);
        }

        let candidates = dedup_candidates(candidates);
        let fetch_start = Instant::now();
        let evidence = self.gather(candidates, &stop).await;
        let fetch_time_ms = fetch_start.elapsed().as_millis() as u64;

        let audit_path = match audit_path {
            Some(path) => persist_audit(path.to_path_buf(), evidence.clone()).await,
            None => None,
        };

        let corpus = Corpus::from_evidence(&evidence);
        info!(
            "Corpus built: {} usable of {} candidates (search {}ms, fetch {}ms)",
            corpus.len(),
            evidence.len(),
            search_time_ms,
            fetch_time_ms
        );

        CorpusBuild {
            keywords,
            evidence,
            corpus,
            audit_path,
            search_time_ms,
            fetch_time_ms,
        }
    }

    /// Fetch and extract every candidate on a bounded pool, back in rank order
    async fn gather(&self, candidates: Vec<(usize, String)>, stop: &RunStop) -> Vec<EvidenceItem> {
        let pool = self.config.max_concurrent_fetches.max(1);

        let mut evidence: Vec<EvidenceItem> = stream::iter(candidates)
            .map(|(rank, url)| self.evidence_for(url, rank, stop))
            .buffer_unordered(pool)
            .collect()
            .await;

        evidence.sort_by_key(|item| item.rank);
        evidence
    }

    async fn evidence_for(&self, url: String, rank: usize, stop: &RunStop) -> EvidenceItem {
        if stop.is_stopped() {
            return EvidenceItem::unfetched(url, rank, EvidenceStatus::FetchError);
        }

        let result = tokio::select! {
            biased;
            _ = stop.wait() => {
                debug!("Fetch abandoned: {}", url);
                return EvidenceItem::unfetched(url, rank, EvidenceStatus::FetchError);
            }
            result = self.fetcher.fetch(&url, self.fetch_timeout) => result,
        };

        match (result.status, result.body) {
            (FetchStatus::Ok, Some(body)) => {
                let item = EvidenceItem::from_body(url, rank, &body);
                debug!("Extracted {} chars from {} ({:?})", item.content.len(), item.url, item.status);
                item
            }
            (FetchStatus::Ok, None) => EvidenceItem::unfetched(url, rank, EvidenceStatus::Empty),
            (status, _) => {
                debug!("Fetch failed for {}: {:?}", url, status);
                EvidenceItem::unfetched(url, rank, status.into())
            }
        }
    }
}

/// Write the audit table off the async workers; `None` when it was not written
async fn persist_audit(path: PathBuf, rows: Vec<EvidenceItem>) -> Option<PathBuf> {
    let written = tokio::task::spawn_blocking(move || match write_audit_table(&path, &rows) {
        Ok(()) => Some(path),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Audit table not written");
            None
        }
    })
    .await;

    written.unwrap_or_else(|e| {
        warn!(error = %e, "Audit table task failed");
        None
    })
}

/// Cancellation token plus optional wall-clock deadline for one run
struct RunStop {
    cancel: CancellationToken,
    deadline: Option<tokio::time::Instant>,
}

impl RunStop {
    fn new(cancel: CancellationToken, limit: Option<Duration>) -> Self {
        Self {
            cancel,
            deadline: limit.map(|d| tokio::time::Instant::now() + d),
        }
    }

    fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
            || self
                .deadline
                .is_some_and(|d| tokio::time::Instant::now() >= d)
    }

    async fn wait(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.cancel.cancelled().await,
        }
    }
}

/// Drop repeated candidates, keeping the best-ranked; ranks are search positions
fn dedup_candidates(urls: Vec<String>) -> Vec<(usize, String)> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .enumerate()
        .filter(|(_, url)| seen.insert(normalize_url(url)))
        .collect()
}

/// Dedup key: fragment removed, host lower-cased
fn normalize_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.trim().to_string(),
    }
}
