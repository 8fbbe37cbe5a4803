// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence corpus
//!
//! ```text
//! Claim → keywords → SearchService → candidates (deduplicated)
//!       → PageFetcher + extractor (bounded pool) → EvidenceItem per candidate
//!       → audit table (all rows) + Corpus (usable rows only)
//! ```

pub mod audit;
pub mod builder;
pub mod config;
pub mod types;

pub use audit::{write_audit_table, AuditError, AUDIT_HEADER};
pub use builder::CorpusBuilder;
pub use config::{CorpusConfig, DEFAULT_AUDIT_PATH};
pub use types::{Corpus, CorpusBuild, EvidenceItem, EvidenceStatus, FETCH_FAILED_SENTINEL};
