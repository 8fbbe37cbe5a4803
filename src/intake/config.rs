// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for claim intake

use serde::{Deserialize, Serialize};

use crate::config::{env_parse, env_string, ConfigError};

/// Configuration for OCR and transcript intake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// OpenAI-compatible vision endpoint; image claims are refused when unset
    pub ocr_endpoint: Option<String>,
    pub ocr_model: String,
    /// Transcript languages, tried in order
    pub transcript_languages: Vec<String>,
    /// Transcript request timeout in seconds
    pub transcript_timeout_secs: u64,
}

impl IntakeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ocr_endpoint: env_string("OCR_ENDPOINT"),
            ocr_model: env_string("OCR_MODEL").unwrap_or(defaults.ocr_model),
            transcript_languages: env_string("TRANSCRIPT_LANGUAGES")
                .map(|v| parse_languages(&v))
                .filter(|langs| !langs.is_empty())
                .unwrap_or(defaults.transcript_languages),
            transcript_timeout_secs: env_parse("TRANSCRIPT_TIMEOUT_SECS")
                .unwrap_or(defaults.transcript_timeout_secs),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transcript_languages.is_empty() {
            return Err(ConfigError::invalid(
                "intake.transcript_languages",
                "at least one language is required",
            ));
        }
        if self.transcript_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "intake.transcript_timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some(endpoint) = &self.ocr_endpoint {
            if url::Url::parse(endpoint).is_err() {
                return Err(ConfigError::invalid(
                    "intake.ocr_endpoint",
                    format!("'{}' is not a URL", endpoint),
                ));
            }
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            ocr_endpoint: None,
            ocr_model: "qwen2-vl-7b-instruct".to_string(),
            transcript_languages: vec!["en".to_string(), "hi".to_string()],
            transcript_timeout_secs: 15,
        }
    }
}

/// Comma-separated language list, blanks dropped
fn parse_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
