// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content fetching and extraction for candidate sources
//!
//! ## Architecture
//!
//! ```text
//! Candidate URL → PageFetcher → HTML → extract_important_content → Snippet
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = ContentFetcher::new(ContentFetchConfig::from_env())?;
//! let page = fetcher.fetch("https://example.com", Duration::from_secs(10)).await;
//! if let Some(body) = page.body {
//!     let snippet = extract_important_content(&body);
//! }
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::ContentFetchConfig;
pub use extractor::{
    extract_article_text, extract_important_content, is_sentinel, EXTRACT_ERROR_PREFIX,
    NO_CONTENT_SENTINEL,
};
pub use fetcher::{is_safe_url, ContentFetcher, FetchError, FetchResult, FetchStatus, PageFetcher};
