// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::config::{env_parse, env_string, ConfigError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Check results kept for `GET /v1/check/:id` (default: 256)
    pub result_capacity: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_string("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT").unwrap_or(defaults.port),
            result_capacity: env_parse("API_RESULT_CAPACITY").unwrap_or(defaults.result_capacity),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_capacity == 0 {
            return Err(ConfigError::invalid("api.result_capacity", "must be at least 1"));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::invalid(
                    "api.host",
                    format!("'{}:{}' is not a socket address", self.host, self.port),
                )
            })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            result_capacity: 256,
        }
    }
}
