// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fact-check node
//!
//! Gathers web evidence for a claim (keywords → search → fetch → extract →
//! corpus) and hands it to a pluggable judge for a verdict.

pub mod api;
pub mod checker;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod intake;
pub mod judge;
pub mod llm;
pub mod search;

pub use checker::{CheckOptions, CheckOutcome, CheckReport, FactChecker};
pub use config::{AppConfig, ConfigError};
pub use corpus::{Corpus, CorpusBuild, CorpusBuilder, EvidenceItem, EvidenceStatus};
pub use intake::{Claim, ClaimInput, ClaimIntake};
pub use judge::{Judge, Verdict, VerdictLabel};
