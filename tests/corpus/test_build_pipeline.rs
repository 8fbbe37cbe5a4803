// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Corpus building from claim to filtered, rank-ordered evidence

use factcheck_node::corpus::{EvidenceStatus, FETCH_FAILED_SENTINEL};
use factcheck_node::intake::Claim;
use factcheck_node::search::content::FetchStatus;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::support::*;

const A: &str = "https://news.example/a";
const B: &str = "https://news.example/b";
const C: &str = "https://factcheck.example/c";

#[tokio::test]
async fn test_failed_candidate_excluded_from_corpus() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Status(FetchStatus::NotFound)),
        (C, Page::Html(PAGE_C)),
    ]));
    let builder = builder(&[A, B, C], fetcher.clone(), corpus_config(None));

    let build = builder
        .build(&Claim::text("GST on school fees 28%"), 10, &CancellationToken::new())
        .await;

    assert_eq!(build.keywords, vec!["GST", "school", "fees"]);
    assert_eq!(build.corpus.urls(), vec![A, C]);
    assert_eq!(
        build.corpus.items()[0].content,
        "GST exemption | School fees are exempt."
    );

    let statuses: Vec<EvidenceStatus> = build.evidence.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![EvidenceStatus::Ok, EvidenceStatus::NotFound, EvidenceStatus::Ok]
    );
    assert_eq!(build.evidence[1].content, FETCH_FAILED_SENTINEL);
    assert_eq!(fetcher.calls(), 3);
    assert!(build.has_evidence());
}

#[tokio::test]
async fn test_stop_words_and_possessives_removed() {
    let provider = StaticProvider::new(&[A]);
    let fetcher = Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))]));
    let search = Arc::new(factcheck_node::search::SearchService::with_providers(
        factcheck_node::search::SearchConfig::default(),
        vec![Box::new(provider)],
    ));
    let builder = factcheck_node::corpus::CorpusBuilder::new(
        search,
        fetcher,
        corpus_config(None),
        Duration::from_secs(2),
    );

    let build = builder
        .build(&Claim::text("The students' fees rose"), 5, &CancellationToken::new())
        .await;
    assert_eq!(build.keywords.join(" "), "students fees rose");
    assert_eq!(build.corpus.len(), 1);
}

#[tokio::test]
async fn test_claim_without_keywords_searches_nothing() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))]));
    let builder = builder(&[A], fetcher.clone(), corpus_config(None));

    let build = builder
        .build(&Claim::text("28% 2024!!"), 10, &CancellationToken::new())
        .await;

    assert!(build.keywords.is_empty());
    assert!(build.evidence.is_empty());
    assert!(build.corpus.is_empty());
    assert!(build.audit_path.is_none());
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_page_without_content_is_empty_evidence() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_EMPTY)),
        (C, Page::Html(PAGE_C)),
    ]));
    let builder = builder(&[A, C], fetcher, corpus_config(None));

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert_eq!(build.evidence[0].status, EvidenceStatus::Empty);
    assert_eq!(build.corpus.urls(), vec![C]);
}

#[tokio::test]
async fn test_repeated_urls_fetched_once() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (C, Page::Html(PAGE_C)),
    ]));
    let repeated = "https://news.example/a#comments";
    let builder = builder(&[A, repeated, C], fetcher.clone(), corpus_config(None));

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(build.corpus.urls(), vec![A, C]);
    let ranks: Vec<usize> = build.evidence.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![0, 2]);
}

#[tokio::test]
async fn test_rank_order_kept_when_fetches_finish_out_of_order() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Slow(Duration::from_millis(150), PAGE_A)),
        (B, Page::Slow(Duration::from_millis(75), PAGE_A)),
        (C, Page::Html(PAGE_C)),
    ]));
    let builder = builder(&[A, B, C], fetcher, corpus_config(None));

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert_eq!(build.corpus.urls(), vec![A, B, C]);
}

#[tokio::test]
async fn test_fetch_pool_is_bounded() {
    let urls: Vec<String> = (0..8).map(|i| format!("https://news.example/{}", i)).collect();
    let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let pages = url_refs
        .iter()
        .map(|url| (*url, Page::Slow(Duration::from_millis(30), PAGE_A)))
        .collect();
    let fetcher = Arc::new(ScriptedFetcher::new(pages));

    let mut config = corpus_config(None);
    config.max_concurrent_fetches = 2;
    let builder = builder(&url_refs, fetcher.clone(), config);

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert_eq!(build.corpus.len(), 8);
    assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_candidates_limited() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Html(PAGE_A)),
        (C, Page::Html(PAGE_C)),
    ]));
    let builder = builder(&[A, B, C], fetcher.clone(), corpus_config(None));

    let build = builder
        .build(&Claim::text("GST students"), 2, &CancellationToken::new())
        .await;

    assert_eq!(build.evidence.len(), 2);
    assert_eq!(fetcher.calls(), 2);
}
