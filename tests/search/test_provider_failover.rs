// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! SearchService provider ordering, failover and result filtering

use async_trait::async_trait;
use factcheck_node::search::{
    SearchConfig, SearchError, SearchProvider, SearchResult, SearchService,
};
use tokio_util::sync::CancellationToken;

struct FixedProvider {
    name: &'static str,
    priority: u8,
    urls: Option<Vec<&'static str>>,
}

#[async_trait]
impl SearchProvider for FixedProvider {
    async fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let urls = self.urls.as_ref().ok_or_else(|| SearchError::ApiError {
            status: 503,
            message: "down".to_string(),
        })?;
        Ok(urls
            .iter()
            .take(num_results)
            .map(|url| SearchResult {
                title: String::new(),
                url: url.to_string(),
                snippet: String::new(),
                published_date: None,
                source: self.name.to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        true
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

fn keywords() -> Vec<String> {
    vec!["gst".to_string(), "students".to_string()]
}

#[tokio::test]
async fn test_failing_provider_falls_over() {
    let service = SearchService::with_providers(
        SearchConfig::default(),
        vec![
            Box::new(FixedProvider {
                name: "primary",
                priority: 10,
                urls: None,
            }),
            Box::new(FixedProvider {
                name: "backup",
                priority: 50,
                urls: Some(vec!["https://b.example/1"]),
            }),
        ],
    );

    let response = service
        .search_response("gst students", 5, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.provider, "backup");
    assert_eq!(response.urls(), vec!["https://b.example/1"]);
}

#[tokio::test]
async fn test_duplicates_and_non_web_urls_dropped() {
    let service = SearchService::with_providers(
        SearchConfig::default(),
        vec![Box::new(FixedProvider {
            name: "fixed",
            priority: 10,
            urls: Some(vec![
                "https://a.example/1",
                "ftp://a.example/file",
                "https://a.example/1",
                "https://c.example/3",
            ]),
        })],
    );

    let urls = service.search(&keywords(), 10).await;
    assert_eq!(urls, vec!["https://a.example/1", "https://c.example/3"]);
}

#[tokio::test]
async fn test_all_providers_failing_gives_no_candidates() {
    let service = SearchService::with_providers(
        SearchConfig::default(),
        vec![Box::new(FixedProvider {
            name: "down",
            priority: 10,
            urls: None,
        })],
    );

    assert!(service.search(&keywords(), 10).await.is_empty());
}

#[tokio::test]
async fn test_disabled_search_gives_no_candidates() {
    let config = SearchConfig {
        enabled: false,
        ..SearchConfig::default()
    };
    let service = SearchService::with_providers(
        config,
        vec![Box::new(FixedProvider {
            name: "fixed",
            priority: 10,
            urls: Some(vec!["https://a.example/1"]),
        })],
    );

    assert!(service.search(&keywords(), 10).await.is_empty());
    assert!(matches!(
        service
            .search_response("gst", 10, &CancellationToken::new())
            .await,
        Err(SearchError::SearchDisabled)
    ));
}
