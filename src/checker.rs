// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end fact checking
//!
//! Intake → corpus → judge → report. Every run returns its own
//! [`CheckReport`]; nothing about a run is kept in process-wide state.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::corpus::{Corpus, CorpusBuild, CorpusBuilder, EvidenceItem};
use crate::intake::{
    Claim, ClaimInput, ClaimIntake, IntakeError, OcrEngine, TimedTextSource, TranscriptFetcher,
    VlmOcrEngine,
};
use crate::judge::{AccuracyReport, ChatJudge, Judge, JudgeError, SourceAssessment, Verdict};
use crate::search::content::{extract_article_text, ContentFetcher, FetchStatus, PageFetcher};
use crate::search::SearchService;

/// Message shown when the judge fails; details go to the log only
const JUDGE_FAILED_MESSAGE: &str = "The judge could not evaluate this claim. Please try again later.";

/// How a check ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CheckOutcome {
    /// The claim had no searchable keywords
    NoQuery,
    /// No usable evidence was found
    InsufficientEvidence,
    Judged(Verdict),
    /// Evidence was gathered but no judge is configured
    JudgeUnavailable,
    JudgeFailed { message: String },
}

impl CheckOutcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Judged(verdict) => Some(verdict),
            _ => None,
        }
    }
}

/// Per-run options
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub request_id: Option<String>,
    /// Candidate URLs to fetch
    pub num_results: usize,
    pub assess_sources: bool,
    /// Audit table target; `None` skips the table
    pub audit_path: Option<PathBuf>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            request_id: None,
            num_results: 10,
            assess_sources: false,
            audit_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTimings {
    pub search_ms: u64,
    pub fetch_ms: u64,
    pub judge_ms: u64,
    pub total_ms: u64,
}

/// Everything a check produced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub request_id: String,
    pub checked_at: DateTime<Utc>,
    pub claim: Claim,
    pub keywords: Vec<String>,
    /// All candidates, usable or not, in rank order
    pub evidence: Vec<EvidenceItem>,
    pub corpus: Corpus,
    pub outcome: CheckOutcome,
    pub assessments: Vec<SourceAssessment>,
    pub accuracy: Option<AccuracyReport>,
    pub audit_path: Option<PathBuf>,
    pub timings: CheckTimings,
}

/// Article summary errors
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Failed to fetch the article at {url} ({status:?})")]
    FetchFailed { url: String, status: FetchStatus },

    #[error("No article text found at {0}")]
    NoArticleText(String),
}

/// Result of summarising one article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub request_id: String,
    pub url: String,
    pub title: Option<String>,
    pub article_chars: usize,
    pub outcome: CheckOutcome,
    /// Sources found for the title, when one was given
    pub related: Option<CorpusBuild>,
    pub assessments: Vec<SourceAssessment>,
    pub accuracy: Option<AccuracyReport>,
}

/// The fact-checking pipeline
pub struct FactChecker {
    intake: ClaimIntake,
    builder: CorpusBuilder,
    fetcher: Arc<dyn PageFetcher>,
    judge: Option<Arc<dyn Judge>>,
    judge_timeout: Duration,
    assess_concurrency: usize,
    fetch_timeout: Duration,
}

impl FactChecker {
    pub fn new(
        intake: ClaimIntake,
        builder: CorpusBuilder,
        fetcher: Arc<dyn PageFetcher>,
        judge: Option<Arc<dyn Judge>>,
    ) -> Self {
        Self {
            intake,
            builder,
            fetcher,
            judge,
            judge_timeout: Duration::from_secs(120),
            assess_concurrency: 4,
            fetch_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_judge_timeout(mut self, timeout: Duration) -> Self {
        self.judge_timeout = timeout;
        self
    }

    pub fn with_assess_concurrency(mut self, concurrency: usize) -> Self {
        self.assess_concurrency = concurrency.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Wire the real search, fetch, judge, OCR and transcript backends
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let search = Arc::new(SearchService::new(config.search.clone())?);
        let fetcher: Arc<dyn PageFetcher> = Arc::new(ContentFetcher::new(config.content.clone())?);
        let builder = CorpusBuilder::new(
            search,
            fetcher.clone(),
            config.corpus.clone(),
            config.content.timeout(),
        );

        let judge = ChatJudge::from_config(&config.judge)?.map(|j| Arc::new(j) as Arc<dyn Judge>);
        let ocr = VlmOcrEngine::from_config(&config.intake, config.judge.timeout())?
            .map(|o| Arc::new(o) as Arc<dyn OcrEngine>);
        let transcript_timeout = Duration::from_secs(config.intake.transcript_timeout_secs);
        let transcripts = TranscriptFetcher::new(
            Arc::new(TimedTextSource::new(transcript_timeout)?),
            config.intake.transcript_languages.clone(),
        );

        if judge.is_none() {
            warn!("No judge endpoint configured, checks will stop after evidence gathering");
        }

        Ok(Self::new(
            ClaimIntake::new(ocr, Some(Arc::new(transcripts))),
            builder,
            fetcher,
            judge,
        )
        .with_judge_timeout(config.judge.timeout())
        .with_assess_concurrency(config.judge.assess_concurrency)
        .with_fetch_timeout(config.content.timeout()))
    }

    pub fn intake(&self) -> &ClaimIntake {
        &self.intake
    }

    pub fn judge_name(&self) -> Option<&str> {
        self.judge.as_ref().map(|j| j.name())
    }

    pub fn corpus_builder(&self) -> &CorpusBuilder {
        &self.builder
    }

    /// Resolve `input` into a claim and check it
    pub async fn check(
        &self,
        input: ClaimInput,
        options: CheckOptions,
        cancel: &CancellationToken,
    ) -> Result<CheckReport, IntakeError> {
        let claim = self.intake.resolve(input).await?;
        Ok(self.check_claim(claim, options, cancel).await)
    }

    /// Check an already captured claim
    pub async fn check_claim(
        &self,
        claim: Claim,
        options: CheckOptions,
        cancel: &CancellationToken,
    ) -> CheckReport {
        let start = Instant::now();
        let checked_at = Utc::now();
        let request_id = options
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let build = self
            .builder
            .build_with_audit(&claim, options.num_results, cancel, options.audit_path.as_deref())
            .await;

        let judge_start = Instant::now();
        let (outcome, assessments, accuracy) = if build.keywords.is_empty() {
            (CheckOutcome::NoQuery, Vec::new(), None)
        } else if build.corpus.is_empty() {
            (CheckOutcome::InsufficientEvidence, Vec::new(), None)
        } else {
            let corpus_text = build
                .corpus
                .combined_text(self.builder.config().max_chars);
            let outcome = self.judge_claim(&corpus_text, claim.as_str(), cancel).await;
            let (assessments, accuracy) = if options.assess_sources {
                let assessments = self
                    .assess_sources(claim.headline(), build.corpus.items(), cancel)
                    .await;
                let accuracy = AccuracyReport::from_assessments(&assessments);
                (assessments, Some(accuracy))
            } else {
                (Vec::new(), None)
            };
            (outcome, assessments, accuracy)
        };

        let timings = CheckTimings {
            search_ms: build.search_time_ms,
            fetch_ms: build.fetch_time_ms,
            judge_ms: judge_start.elapsed().as_millis() as u64,
            total_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            request_id = %request_id,
            "Check finished: {} usable sources, outcome {:?} in {}ms",
            build.corpus.len(),
            outcome_name(&outcome),
            timings.total_ms
        );

        CheckReport {
            request_id,
            checked_at,
            claim,
            keywords: build.keywords,
            evidence: build.evidence,
            corpus: build.corpus,
            outcome,
            assessments,
            accuracy,
            audit_path: build.audit_path,
            timings,
        }
    }

    /// Fetch an article, judge it, and assess sources found for its title
    pub async fn summarize(
        &self,
        url: &str,
        title: Option<&str>,
        options: CheckOptions,
        cancel: &CancellationToken,
    ) -> Result<SummaryReport, SummarizeError> {
        let request_id = options
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let page = self.fetcher.fetch(url, self.fetch_timeout).await;
        let body = match (page.status, page.body) {
            (FetchStatus::Ok, Some(body)) => body,
            (status, _) => {
                return Err(SummarizeError::FetchFailed {
                    url: url.to_string(),
                    status,
                })
            }
        };
        let article = extract_article_text(&body)
            .ok_or_else(|| SummarizeError::NoArticleText(url.to_string()))?;

        let article_claim = Claim::text(article.as_str());
        let claim_text = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| article_claim.headline());
        let excerpt = truncate_chars(&article, self.builder.config().max_chars);
        let outcome = self.judge_claim(excerpt, claim_text, cancel).await;

        let title = title.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        let (related, assessments, accuracy) = match &title {
            Some(title) => {
                let build = self
                    .builder
                    .build_with_audit(
                        &Claim::text(title.as_str()),
                        options.num_results,
                        cancel,
                        options.audit_path.as_deref(),
                    )
                    .await;
                let assessments = self.assess_sources(title, build.corpus.items(), cancel).await;
                let accuracy = AccuracyReport::from_assessments(&assessments);
                (Some(build), assessments, Some(accuracy))
            }
            None => (None, Vec::new(), None),
        };

        Ok(SummaryReport {
            request_id,
            url: url.to_string(),
            title,
            article_chars: article.chars().count(),
            outcome,
            related,
            assessments,
            accuracy,
        })
    }

    async fn judge_claim(&self, corpus_text: &str, claim: &str, cancel: &CancellationToken) -> CheckOutcome {
        let Some(judge) = &self.judge else {
            return CheckOutcome::JudgeUnavailable;
        };

        let result = tokio::select! {
            result = tokio::time::timeout(self.judge_timeout, judge.judge(corpus_text, claim)) => {
                result.unwrap_or(Err(JudgeError::Timeout {
                    timeout_secs: self.judge_timeout.as_secs(),
                }))
            }
            _ = cancel.cancelled() => Err(JudgeError::Request("cancelled".to_string())),
        };

        match result {
            Ok(verdict) => CheckOutcome::Judged(verdict),
            Err(e) => {
                warn!(judge = judge.name(), error = %e, "Judge failed");
                CheckOutcome::JudgeFailed {
                    message: JUDGE_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Assess each source on a bounded pool; failures are dropped, order is by rank
    async fn assess_sources(
        &self,
        headline: &str,
        items: &[EvidenceItem],
        cancel: &CancellationToken,
    ) -> Vec<SourceAssessment> {
        let Some(judge) = &self.judge else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, SourceAssessment)> = stream::iter(items.iter().cloned())
            .map(|item| async move {
                if cancel.is_cancelled() {
                    return None;
                }
                let result = tokio::time::timeout(self.judge_timeout, judge.assess_source(headline, &item))
                    .await
                    .unwrap_or(Err(JudgeError::Timeout {
                        timeout_secs: self.judge_timeout.as_secs(),
                    }));
                match result {
                    Ok(assessment) => Some((item.rank, assessment)),
                    Err(e) => {
                        warn!(url = %item.url, error = %e, "Source assessment failed");
                        None
                    }
                }
            })
            .buffer_unordered(self.assess_concurrency)
            .filter_map(|assessed| async move { assessed })
            .collect()
            .await;

        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, assessment)| assessment).collect()
    }
}

fn outcome_name(outcome: &CheckOutcome) -> &'static str {
    match outcome {
        CheckOutcome::NoQuery => "no-query",
        CheckOutcome::InsufficientEvidence => "insufficient-evidence",
        CheckOutcome::Judged(_) => "judged",
        CheckOutcome::JudgeUnavailable => "judge-unavailable",
        CheckOutcome::JudgeFailed { .. } => "judge-failed",
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
