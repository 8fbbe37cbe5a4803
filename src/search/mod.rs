// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence search module
//!
//! Turns a claim into candidate source pages:
//! - Keyword extraction (stop-word filtered, order preserving)
//! - Multiple search providers (Brave, DuckDuckGo) with failover
//! - Rate limiting shared by every request of one kind
//! - Page fetching and heading/paragraph extraction
//!
//! Provider failures degrade to "no candidates" rather than errors.

pub mod brave;
pub mod config;
pub mod content;
pub mod duckduckgo;
pub mod keywords;
pub mod provider;
pub mod rate_limiter;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use keywords::{extract_keywords, Query};
pub use provider::SearchProvider;
pub use service::SearchService;
pub use types::{SearchError, SearchResponse, SearchResult};

pub use content::{
    extract_important_content, ContentFetchConfig, ContentFetcher, FetchResult, FetchStatus,
    PageFetcher,
};
