// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Coordinates search providers and rate limiting, and enforces the
//! candidate contract: at most `limit` URLs, engine order, and never an
//! error for the caller.

use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::brave::BraveSearchProvider;
use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::provider::SearchProvider;
use super::rate_limiter::RequestRateLimiter;
use super::types::{SearchError, SearchResponse};

/// Search service that orchestrates providers and rate limiting
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    rate_limiter: RequestRateLimiter,
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service from configuration
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();

        if let Some(api_key) = &config.providers.brave_api_key {
            providers.push(Box::new(BraveSearchProvider::new(api_key.clone(), timeout)?));
            debug!("Brave Search provider enabled");
        }

        providers.push(Box::new(DuckDuckGoProvider::new(timeout)?));
        debug!("DuckDuckGo provider enabled");

        Ok(Self::with_providers(config, providers))
    }

    /// Create a service over an explicit provider list
    pub fn with_providers(config: SearchConfig, mut providers: Vec<Box<dyn SearchProvider>>) -> Self {
        let preferred = config.providers.preferred_provider.clone();
        // Preferred provider first, then by priority (lower = preferred)
        providers.sort_by_key(|p| (Some(p.name()) != preferred.as_deref(), p.priority()));

        let rate_limiter = RequestRateLimiter::new(config.rate_limit_per_minute);

        Self {
            providers,
            rate_limiter,
            config,
        }
    }

    /// Candidate URLs for a keyword query
    ///
    /// Tokens are joined by single spaces. An empty query performs no search.
    /// Any provider failure degrades to an empty list.
    pub async fn search(&self, query: &[String], limit: usize) -> Vec<String> {
        self.search_cancellable(query, limit, &CancellationToken::new())
            .await
    }

    /// Same as [`search`](Self::search), abandoning the call when `cancel` fires
    pub async fn search_cancellable(
        &self,
        query: &[String],
        limit: usize,
        cancel: &CancellationToken,
    ) -> Vec<String> {
        if query.is_empty() || limit == 0 {
            debug!("Empty query, skipping search");
            return Vec::new();
        }

        let query_string = query.join(" ");
        if cancel.is_cancelled() {
            debug!(query = %query_string, "Search cancelled before start");
            return Vec::new();
        }
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SearchError::Cancelled),
            result = self.search_response(&query_string, limit, cancel) => result,
        };

        match response {
            Ok(response) => response.urls(),
            Err(e) => {
                warn!(query = %query_string, error = %e, "Search degraded to no candidates");
                Vec::new()
            }
        }
    }

    /// Run the query against providers in order, returning the first success
    ///
    /// Results are capped at `num_results`, restricted to http(s) URLs and
    /// free of repeated URLs (first occurrence wins).
    pub async fn search_response(
        &self,
        query: &str,
        num_results: usize,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse, SearchError> {
        if !self.config.enabled {
            return Err(SearchError::SearchDisabled);
        }
        if query.trim().is_empty() || num_results == 0 {
            return Ok(SearchResponse::empty(query));
        }

        if !self.rate_limiter.acquire(cancel).await {
            return Err(SearchError::Cancelled);
        }

        let start = Instant::now();
        let mut last_error = None;

        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }

            debug!("Trying search provider: {}", provider.name());
            let limit = num_results.min(provider.max_results());

            match provider.search(query, limit).await {
                Ok(mut results) => {
                    let mut seen = HashSet::new();
                    results.retain(|r| is_web_url(&r.url) && seen.insert(r.url.clone()));
                    results.truncate(num_results);
                    let elapsed_ms = start.elapsed().as_millis() as u64;

                    info!(
                        "Search complete: {} results from {} in {}ms",
                        results.len(),
                        provider.name(),
                        elapsed_ms
                    );

                    return Ok(SearchResponse {
                        query: query.to_string(),
                        result_count: results.len(),
                        results,
                        search_time_ms: elapsed_ms,
                        provider: provider.name().to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        "Search provider {} failed: {}, trying next",
                        provider.name(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SearchError::ProviderUnavailable {
            provider: "all".to_string(),
        }))
    }

    /// Check if search is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Default candidate count from configuration
    pub fn default_num_results(&self) -> usize {
        self.config.default_num_results
    }

    /// Available provider names in the order they are tried
    pub fn available_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
