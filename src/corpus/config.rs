// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for corpus building

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{env_parse, env_string, ConfigError};

/// Default audit table written by one-shot runs
pub const DEFAULT_AUDIT_PATH: &str = "web_content_summary.csv";

/// Configuration for corpus building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Concurrent fetch+extract tasks per run; 1 is strictly sequential (default: 10)
    pub max_concurrent_fetches: usize,
    /// Characters of combined corpus text handed to the judge (default: 4000)
    pub max_chars: usize,
    /// Audit table for one-shot runs, overwritten each run
    pub audit_path: Option<PathBuf>,
    /// Directory holding per-request audit tables on the server
    pub audit_dir: PathBuf,
    /// Wall-clock limit for a whole run in seconds
    pub run_deadline_secs: Option<u64>,
}

impl CorpusConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_concurrent_fetches: env_parse("CORPUS_MAX_CONCURRENT_FETCHES")
                .unwrap_or(defaults.max_concurrent_fetches),
            max_chars: env_parse("CORPUS_MAX_CHARS").unwrap_or(defaults.max_chars),
            audit_path: env_string("CORPUS_AUDIT_PATH")
                .map(PathBuf::from)
                .or(defaults.audit_path),
            audit_dir: env_string("CORPUS_AUDIT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audit_dir),
            run_deadline_secs: env_parse("CORPUS_RUN_DEADLINE_SECS").or(defaults.run_deadline_secs),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_fetches == 0 {
            return Err(ConfigError::invalid(
                "corpus.max_concurrent_fetches",
                "must be at least 1",
            ));
        }
        if self.max_chars == 0 {
            return Err(ConfigError::invalid("corpus.max_chars", "must be at least 1"));
        }
        if self.run_deadline_secs == Some(0) {
            return Err(ConfigError::invalid(
                "corpus.run_deadline_secs",
                "must be greater than 0 when set",
            ));
        }
        Ok(())
    }

    /// Run deadline as a duration
    pub fn run_deadline(&self) -> Option<Duration> {
        self.run_deadline_secs.map(Duration::from_secs)
    }

    /// Audit table path for one server request
    pub fn audit_path_for(&self, request_id: &str) -> PathBuf {
        self.audit_dir.join(format!("{}.csv", request_id))
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 10,
            max_chars: 4000,
            audit_path: Some(PathBuf::from(DEFAULT_AUDIT_PATH)),
            audit_dir: PathBuf::from("audit"),
            run_deadline_secs: None,
        }
    }
}
