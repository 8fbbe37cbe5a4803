// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Summarize API request types

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::check::request::validate_request_id;
use crate::api::errors::ApiError;

/// Request body for POST /v1/summarize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeApiRequest {
    /// Article URL (http or https)
    pub url: String,

    /// Headline; when given, sources found for it are assessed too
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default = "default_num_results")]
    pub num_results: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

fn default_num_results() -> usize {
    10
}

impl SummarizeApiRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        match Url::parse(self.url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::validation("url", "url must be an http(s) URL")),
        }
        if !(1..=20).contains(&self.num_results) {
            return Err(ApiError::validation(
                "numResults",
                "numResults must be between 1 and 20",
            ));
        }
        validate_request_id(self.request_id.as_deref())
    }
}
