// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Judging capability
//!
//! Turns a corpus and a claim into a structured [`Verdict`], and optionally
//! assesses each evidence source on its own. The model behind it is opaque,
//! slow and allowed to fail; callers bound it with a timeout.

pub mod accuracy;
pub mod chat;
pub mod config;
pub mod parse;
pub mod types;

use async_trait::async_trait;

use crate::corpus::EvidenceItem;

pub use accuracy::{legacy_accuracy, AccuracyReport, AccuracySample};
pub use chat::ChatJudge;
pub use config::JudgeConfig;
pub use parse::{parse_assessment, parse_verdict};
pub use types::{JudgeError, SourceAssessment, Verdict, VerdictLabel};

/// Trait for judging backends
#[async_trait]
pub trait Judge: Send + Sync {
    /// Judge `claim` against the combined corpus text
    async fn judge(&self, corpus_text: &str, claim: &str) -> Result<Verdict, JudgeError>;

    /// Summarize one source and rate the headline against it
    async fn assess_source(
        &self,
        headline: &str,
        item: &EvidenceItem,
    ) -> Result<SourceAssessment, JudgeError>;

    /// Backend name for logging and health output
    fn name(&self) -> &str;
}
