// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scripted search provider and page fetcher for corpus tests

#![allow(dead_code)]

use async_trait::async_trait;
use factcheck_node::corpus::{CorpusBuilder, CorpusConfig};
use factcheck_node::search::content::{FetchResult, FetchStatus, PageFetcher};
use factcheck_node::search::{
    SearchConfig, SearchError, SearchProvider, SearchResult, SearchService,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Returns the same URLs for every query and records what it was asked
pub struct StaticProvider {
    pub urls: Vec<String>,
    pub queries: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn new(urls: &[&str]) -> Self {
        Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self
            .urls
            .iter()
            .take(num_results)
            .map(|url| SearchResult {
                title: String::new(),
                url: url.clone(),
                snippet: String::new(),
                published_date: None,
                source: "static".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// One scripted page
#[derive(Clone)]
pub enum Page {
    Html(&'static str),
    Status(FetchStatus),
    /// Served after a delay
    Slow(Duration, &'static str),
    /// Never answers
    Hang,
}

/// Serves scripted pages and counts fetches
pub struct ScriptedFetcher {
    pages: HashMap<String, Page>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(pages: Vec<(&str, Page)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, page)| (url.to_string(), page))
                .collect(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let page = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or(Page::Status(FetchStatus::NotFound));
        let result = match page {
            Page::Html(body) => FetchResult::ok(body.to_string()),
            Page::Status(status) => FetchResult::failed(status),
            Page::Slow(delay, body) => {
                if delay >= timeout {
                    tokio::time::sleep(timeout).await;
                    FetchResult::failed(FetchStatus::FetchError)
                } else {
                    tokio::time::sleep(delay).await;
                    FetchResult::ok(body.to_string())
                }
            }
            Page::Hang => {
                std::future::pending::<()>().await;
                FetchResult::failed(FetchStatus::FetchError)
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn search_service(provider: StaticProvider) -> Arc<SearchService> {
    Arc::new(SearchService::with_providers(
        SearchConfig::default(),
        vec![Box::new(provider)],
    ))
}

pub fn corpus_config(audit_path: Option<PathBuf>) -> CorpusConfig {
    CorpusConfig {
        audit_path,
        ..CorpusConfig::default()
    }
}

pub fn builder(
    urls: &[&str],
    fetcher: Arc<ScriptedFetcher>,
    config: CorpusConfig,
) -> CorpusBuilder {
    CorpusBuilder::new(
        search_service(StaticProvider::new(urls)),
        fetcher,
        config,
        Duration::from_secs(2),
    )
}

pub const PAGE_A: &str = "<html><body><h1>GST exemption</h1><p>School fees are exempt.</p></body></html>";
pub const PAGE_C: &str = "<html><body><h2>Fact check</h2><p>No 28% GST on students.</p><p>CBIC clarified.</p></body></html>";
pub const PAGE_EMPTY: &str = "<html><body><div>menu</div><script>x()</script></body></html>";
