// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the judge

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{env_parse, env_string, ConfigError};

/// Configuration for the judging capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Base URL of an OpenAI-compatible chat endpoint; no judge when unset
    pub endpoint: Option<String>,
    /// Model name sent with each request
    pub model: String,
    /// Bearer token, if the endpoint needs one
    pub api_key: Option<String>,
    /// Per-call timeout in seconds (default: 120)
    pub timeout_secs: u64,
    /// Concurrent per-source assessments (default: 4)
    pub assess_concurrency: usize,
    /// Completion token cap per call (default: 512)
    pub max_tokens: u32,
    pub temperature: f32,
}

impl JudgeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env_string("JUDGE_ENDPOINT"),
            model: env_string("JUDGE_MODEL").unwrap_or(defaults.model),
            api_key: env_string("JUDGE_API_KEY"),
            timeout_secs: env_parse("JUDGE_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            assess_concurrency: env_parse("JUDGE_ASSESS_CONCURRENCY")
                .unwrap_or(defaults.assess_concurrency),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("judge.timeout_secs", "must be at least 1"));
        }
        if self.assess_concurrency == 0 {
            return Err(ConfigError::invalid(
                "judge.assess_concurrency",
                "must be at least 1",
            ));
        }
        if let Some(endpoint) = &self.endpoint {
            if url::Url::parse(endpoint).is_err() {
                return Err(ConfigError::invalid(
                    "judge.endpoint",
                    format!("'{}' is not a URL", endpoint),
                ));
            }
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid("judge.temperature", "must be within 0.0-2.0"));
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: "llama-3.1-8b-instruct".to_string(),
            api_key: None,
            timeout_secs: 120,
            assess_concurrency: 4,
            max_tokens: 512,
            temperature: 0.2,
        }
    }
}
