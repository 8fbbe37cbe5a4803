// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for content fetching
//!
//! Defines settings for HTTP fetching of candidate source pages.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{env_flag, env_parse, ConfigError};

/// Configuration for content fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFetchConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_secs: u64,
    /// Page fetches allowed per minute across a run (default: 120)
    pub rate_limit_per_minute: u32,
    /// Maximum redirects followed per page (default: 5)
    pub max_redirects: usize,
    /// Allow localhost and private-network hosts (default: false)
    pub allow_private_hosts: bool,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env_parse("CONTENT_FETCH_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            rate_limit_per_minute: env_parse("CONTENT_FETCH_RATE_PER_MINUTE")
                .unwrap_or(defaults.rate_limit_per_minute),
            max_redirects: defaults.max_redirects,
            allow_private_hosts: env_flag("CONTENT_FETCH_ALLOW_PRIVATE_HOSTS")
                .unwrap_or(defaults.allow_private_hosts),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("content.timeout_secs", "must be at least 1"));
        }
        if self.rate_limit_per_minute == 0 {
            return Err(ConfigError::invalid(
                "content.rate_limit_per_minute",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Per-page timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            rate_limit_per_minute: 120,
            max_redirects: 5,
            allow_private_hosts: false,
        }
    }
}
