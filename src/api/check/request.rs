// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Check API request types

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::intake::ClaimInput;

/// Longest accepted claim text, in characters
pub const MAX_CLAIM_CHARS: usize = 10_000;

/// Request body for POST /v1/check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckApiRequest {
    /// Claim text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Base64 image (data URL prefix allowed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Image format hint such as "png"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,

    /// Candidate URLs to fetch (1-20, default 10)
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Assess every usable source against the claim
    #[serde(default)]
    pub assess_sources: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

fn default_num_results() -> usize {
    10
}

/// Client-chosen request ids name audit files, so only `[A-Za-z0-9_-]{1,64}` is accepted
pub fn validate_request_id(request_id: Option<&str>) -> Result<(), ApiError> {
    let Some(id) = request_id else {
        return Ok(());
    };
    let valid = !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ApiError::validation(
            "requestId",
            "requestId may only contain letters, digits, '-' and '_' (max 64)",
        ))
    }
}

impl CheckApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), ApiError> {
        let inputs = [
            self.text.is_some(),
            self.image.is_some(),
            self.youtube_url.is_some(),
        ]
        .iter()
        .filter(|given| **given)
        .count();

        match inputs {
            0 => {
                return Err(ApiError::InvalidRequest(
                    "One of text, image or youtubeUrl is required".to_string(),
                ))
            }
            1 => {}
            _ => {
                return Err(ApiError::InvalidRequest(
                    "Only one of text, image or youtubeUrl may be given".to_string(),
                ))
            }
        }

        if let Some(text) = &self.text {
            if text.trim().is_empty() {
                return Err(ApiError::validation("text", "Claim text cannot be empty"));
            }
            if text.chars().count() > MAX_CLAIM_CHARS {
                return Err(ApiError::validation(
                    "text",
                    format!("Claim text too long (max {} characters)", MAX_CLAIM_CHARS),
                ));
            }
        }
        if !(1..=20).contains(&self.num_results) {
            return Err(ApiError::validation(
                "numResults",
                "numResults must be between 1 and 20",
            ));
        }
        validate_request_id(self.request_id.as_deref())
    }

    /// The claim input, once validated
    pub fn input(&self) -> Option<ClaimInput> {
        if let Some(text) = &self.text {
            return Some(ClaimInput::Text(text.clone()));
        }
        if let Some(data) = &self.image {
            return Some(ClaimInput::Image {
                data: data.clone(),
                format: self.format.clone().unwrap_or_default(),
            });
        }
        self.youtube_url
            .as_ref()
            .map(|url| ClaimInput::YouTube { url: url.clone() })
    }
}
