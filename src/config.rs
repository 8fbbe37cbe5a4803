// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Aggregated node configuration
//!
//! Every component owns a `*Config` with `Default`, `from_env()` and
//! `validate()`. [`AppConfig`] gathers them and can also be read from a TOML
//! file in which any omitted section or field keeps its default.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::api::config::ApiConfig;
use crate::corpus::config::CorpusConfig;
use crate::intake::config::IntakeConfig;
use crate::judge::config::JudgeConfig;
use crate::search::{ContentFetchConfig, SearchConfig};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Full configuration of the fact-check node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub content: ContentFetchConfig,
    pub corpus: CorpusConfig,
    pub judge: JudgeConfig,
    pub intake: IntakeConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        Self {
            search: SearchConfig::from_env(),
            content: ContentFetchConfig::from_env(),
            corpus: CorpusConfig::from_env(),
            judge: JudgeConfig::from_env(),
            intake: IntakeConfig::from_env(),
            api: ApiConfig::from_env(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from `path` when given, otherwise from the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        self.content.validate()?;
        self.corpus.validate()?;
        self.judge.validate()?;
        self.intake.validate()?;
        self.api.validate()?;
        Ok(())
    }
}

/// Parse a boolean flag value ("true"/"false", "1"/"0", "yes"/"no", "on"/"off")
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Boolean environment variable; `None` when unset or unrecognised
pub(crate) fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_flag(&v))
}

/// Parsed environment variable; `None` when unset or unparsable
pub(crate) fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Non-empty string environment variable
pub(crate) fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
