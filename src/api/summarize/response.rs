// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Summarize API response types

use serde::{Deserialize, Serialize};

use crate::checker::{CheckOutcome, SummaryReport};
use crate::corpus::EvidenceItem;
use crate::judge::{AccuracyReport, SourceAssessment, Verdict};

/// Response body for POST /v1/summarize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeApiResponse {
    pub request_id: String,
    pub url: String,
    pub title: Option<String>,
    pub article_chars: usize,
    pub outcome: CheckOutcome,
    pub verdict: Option<Verdict>,
    /// Sources found for the title
    pub sources: Vec<EvidenceItem>,
    pub assessments: Vec<SourceAssessment>,
    pub accuracy: Option<AccuracyReport>,
}

impl From<SummaryReport> for SummarizeApiResponse {
    fn from(report: SummaryReport) -> Self {
        Self {
            verdict: report.outcome.verdict().cloned(),
            request_id: report.request_id,
            url: report.url,
            title: report.title,
            article_chars: report.article_chars,
            outcome: report.outcome,
            sources: report
                .related
                .map(|build| build.corpus.into_items())
                .unwrap_or_default(),
            assessments: report.assessments,
            accuracy: report.accuracy,
        }
    }
}
