// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Verdict and assessment types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Veracity label of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLabel {
    True,
    False,
    Misleading,
    Unverified,
}

impl FromStr for VerdictLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "misleading" => Ok(Self::Misleading),
            "unverified" => Ok(Self::Unverified),
            other => Err(format!("unknown verdict '{}'", other)),
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::True => "true",
            Self::False => "false",
            Self::Misleading => "misleading",
            Self::Unverified => "unverified",
        };
        f.write_str(label)
    }
}

/// Structured judgment of a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub label: VerdictLabel,
    /// 0..=100
    pub confidence: u8,
    pub summary: String,
}

/// Judge's view of one evidence source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAssessment {
    pub url: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<u8>,
}

/// Errors that can occur while judging
#[derive(Debug, Error)]
pub enum JudgeError {
    /// No judge configured on this host
    #[error("Judge not configured")]
    Unavailable,

    /// Transport or endpoint failure
    #[error("Judge request failed: {0}")]
    Request(String),

    /// Judge did not answer in time
    #[error("Judge timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Answer matched neither the JSON contract nor the legacy phrase
    #[error("Malformed judge response: {reason}")]
    MalformedResponse { reason: String },
}

impl JudgeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}
