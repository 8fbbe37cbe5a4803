// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP content fetching with bounded time and graceful failure
//!
//! Retrieves raw markup for candidate source URLs. Failures never escape
//! [`PageFetcher::fetch`]: they are classified into a [`FetchStatus`].

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::{Host, Url};

use super::config::ContentFetchConfig;
use crate::search::rate_limiter::RequestRateLimiter;

/// Outcome class of a single page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    /// 2xx with a readable body
    Ok,
    /// 404 or 410
    NotFound,
    /// Timeout, network error, other non-2xx, blocked URL or cancellation
    FetchError,
}

/// Result of one fetch attempt; `body` is present only for [`FetchStatus::Ok`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub status: FetchStatus,
    pub body: Option<String>,
}

impl FetchResult {
    pub fn ok(body: String) -> Self {
        Self {
            status: FetchStatus::Ok,
            body: Some(body),
        }
    }

    pub fn failed(status: FetchStatus) -> Self {
        Self { status, body: None }
    }
}

/// Content fetch error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),
    /// HTTP non-success status
    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },
    /// URL is unsafe (localhost, private IP, non-web scheme)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
    /// Body could not be decoded
    #[error("Unreadable body from {url}: {reason}")]
    Body { url: String, reason: String },
    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// Status recorded for this failure
    pub fn status(&self) -> FetchStatus {
        match self {
            Self::Status { status: 404 | 410, .. } => FetchStatus::NotFound,
            _ => FetchStatus::FetchError,
        }
    }
}

/// Fetches raw page markup
///
/// Implemented by [`ContentFetcher`] and by test doubles that drive the
/// corpus builder without a network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` within `timeout`; never fails, only classifies
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// reqwest-backed page fetcher with URL safety checks and rate limiting
pub struct ContentFetcher {
    client: Client,
    rate_limiter: RequestRateLimiter,
    config: ContentFetchConfig,
}

impl ContentFetcher {
    /// Create a new content fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("Mozilla/5.0 (compatible; FactCheckBot/1.0)")
            .redirect(redirect_policy(config.max_redirects, config.allow_private_hosts))
            .build()?;

        let rate_limiter = RequestRateLimiter::new(config.rate_limit_per_minute);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Fetch the body of a single URL, surfacing the failure reason
    pub async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        if !self.config.allow_private_hosts && !is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        if self.config.allow_private_hosts && !is_web_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        // The permit wait counts against the same deadline as the request
        tokio::time::timeout(timeout, async {
            self.rate_limiter.wait().await;
            self.request(url, timeout).await
        })
        .await
        .map_err(|_| FetchError::Timeout(url.to_string()))?
    }

    async fn request(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!("Fetching content from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ContentFetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for ContentFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        match self.fetch_page(url, timeout).await {
            Ok(body) => FetchResult::ok(body),
            Err(e) => {
                debug!(url = %url, error = %e, "Fetch failed");
                FetchResult::failed(e.status())
            }
        }
    }
}

fn classify_transport(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Http(e.to_string())
    }
}

/// Redirect policy that re-checks every hop
fn redirect_policy(max_redirects: usize, allow_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        let hops = attempt.previous().len();
        match check_redirect(attempt.url().as_str(), hops, max_redirects, allow_private_hosts) {
            Ok(()) => attempt.follow(),
            Err(reason) => attempt.error(reason),
        }
    })
}

/// Whether a redirect to `target` may be followed after `hops` redirects
fn check_redirect(
    target: &str,
    hops: usize,
    max_redirects: usize,
    allow_private_hosts: bool,
) -> Result<(), String> {
    if hops > max_redirects {
        return Err(format!("more than {} redirects", max_redirects));
    }
    let allowed = if allow_private_hosts {
        is_web_url(target)
    } else {
        is_safe_url(target)
    };
    if !allowed {
        return Err(format!("redirect to unsafe URL blocked: {}", target));
    }
    Ok(())
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Check if URL is safe to fetch
///
/// Only http(s) is allowed; loopback, private, link-local and unspecified
/// addresses are refused, as is any `localhost` name.
pub fn is_safe_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => {
            if let Some(mapped) = ip.to_ipv4_mapped() {
                return is_public_ipv4(mapped);
            }
            let first = ip.segments()[0];
            let unique_local = first & 0xfe00 == 0xfc00;
            let link_local = first & 0xffc0 == 0xfe80;
            !(ip.is_loopback() || ip.is_unspecified() || unique_local || link_local)
        }
        None => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}
