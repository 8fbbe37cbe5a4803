// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Check API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checker::{CheckOutcome, CheckReport, CheckTimings};
use crate::corpus::EvidenceItem;
use crate::intake::ClaimOrigin;
use crate::judge::{AccuracyReport, SourceAssessment, Verdict};

/// Response body for POST /v1/check and GET /v1/check/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckApiResponse {
    pub request_id: String,
    pub checked_at: DateTime<Utc>,
    pub claim: String,
    pub claim_origin: ClaimOrigin,
    pub keywords: Vec<String>,
    pub outcome: CheckOutcome,
    /// Shortcut to the verdict when the claim was judged
    pub verdict: Option<Verdict>,
    /// Every candidate in rank order, including failures
    pub evidence: Vec<EvidenceItem>,
    pub corpus: Vec<EvidenceItem>,
    pub assessments: Vec<SourceAssessment>,
    pub accuracy: Option<AccuracyReport>,
    pub audit_path: Option<String>,
    pub timings: CheckTimings,
}

impl From<CheckReport> for CheckApiResponse {
    fn from(report: CheckReport) -> Self {
        Self {
            verdict: report.outcome.verdict().cloned(),
            request_id: report.request_id,
            checked_at: report.checked_at,
            claim: report.claim.as_str().to_string(),
            claim_origin: report.claim.origin().clone(),
            keywords: report.keywords,
            outcome: report.outcome,
            evidence: report.evidence,
            corpus: report.corpus.into_items(),
            assessments: report.assessments,
            accuracy: report.accuracy,
            audit_path: report
                .audit_path
                .map(|path| path.display().to_string()),
            timings: report.timings,
        }
    }
}

impl CheckApiResponse {
    /// Accuracy report, empty when sources were not assessed
    pub fn accuracy_report(&self) -> AccuracyReport {
        self.accuracy.clone().unwrap_or_default()
    }
}
