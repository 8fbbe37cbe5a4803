// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use serde::{Deserialize, Serialize};
use crate::config::{env_flag, env_parse, env_string, ConfigError};

/// Configuration for web search functionality
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Whether web search is enabled
    pub enabled: bool,
    /// Provider-specific configuration
    pub providers: SearchProviderConfig,
    /// Rate limit (requests per minute)
    pub rate_limit_per_minute: u32,
    /// Default number of candidate URLs per claim
    pub default_num_results: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProviderConfig {
    /// Brave Search API key
    pub brave_api_key: Option<String>,
    /// Preferred search provider ("brave" or "duckduckgo")
    pub preferred_provider: Option<String>,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            // DuckDuckGo requires no API key, so search is on unless disabled
            enabled: env_flag("WEB_SEARCH_ENABLED").unwrap_or(defaults.enabled),
            providers: SearchProviderConfig {
                brave_api_key: env_string("BRAVE_API_KEY"),
                preferred_provider: env_string("SEARCH_PROVIDER").map(|p| p.to_lowercase()),
            },
            rate_limit_per_minute: env_parse("SEARCH_RATE_LIMIT_PER_MINUTE")
                .unwrap_or(defaults.rate_limit_per_minute),
            default_num_results: env_parse("SEARCH_NUM_RESULTS")
                .unwrap_or(defaults.default_num_results),
            request_timeout_ms: env_parse("SEARCH_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_per_minute == 0 {
            return Err(ConfigError::invalid("search.rate_limit_per_minute", "must be greater than 0"));
        }
        if self.default_num_results == 0 {
            return Err(ConfigError::invalid("search.default_num_results", "must be at least 1"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::invalid("search.request_timeout_ms", "must be greater than 0"));
        }
        if let Some(preferred) = &self.providers.preferred_provider {
            if !matches!(preferred.as_str(), "brave" | "duckduckgo") {
                return Err(ConfigError::invalid(
                    "search.providers.preferred_provider",
                    format!("unknown provider '{}'", preferred),
                ));
            }
        }
        Ok(())
    }

    /// Check if a keyed search provider is configured
    pub fn has_keyed_provider(&self) -> bool {
        self.providers.brave_api_key.is_some()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            providers: SearchProviderConfig::default(),
            rate_limit_per_minute: 60,
            default_num_results: 10,
            request_timeout_ms: 10_000,
        }
    }
}
