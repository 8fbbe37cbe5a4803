// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Cancellation and run deadlines

use factcheck_node::corpus::EvidenceStatus;
use factcheck_node::intake::Claim;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::support::*;

const A: &str = "https://news.example/a";
const B: &str = "https://news.example/b";

#[tokio::test]
async fn test_cancel_stops_hanging_fetches() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Hang),
    ]));
    let builder = builder(&[A, B], fetcher, corpus_config(None));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let build = builder.build(&Claim::text("GST students"), 10, &cancel).await;

    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(build.evidence.len(), 2);
    assert_eq!(build.evidence[1].status, EvidenceStatus::FetchError);
    assert_eq!(build.corpus.urls(), vec![A]);
}

#[tokio::test]
async fn test_cancelled_before_start_yields_empty_corpus() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))]));
    let builder = builder(&[A], fetcher.clone(), corpus_config(None));

    let cancel = CancellationToken::new();
    cancel.cancel();
    let build = builder.build(&Claim::text("GST students"), 10, &cancel).await;

    assert!(build.corpus.is_empty());
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_run_deadline_bounds_the_build() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Hang),
    ]));
    let mut config = corpus_config(None);
    config.run_deadline_secs = Some(1);
    let builder = builder(&[A, B], fetcher, config);

    let start = Instant::now();
    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(build.corpus.urls(), vec![A]);
    assert_eq!(build.evidence[1].status, EvidenceStatus::FetchError);
}

#[tokio::test]
async fn test_cancelled_run_searches_nothing_and_writes_no_table() {
    let dir = tempfile::tempdir().unwrap();
    let audit = dir.path().join("summary.csv");
    let fetcher = Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))]));
    let builder = builder(&[A], fetcher.clone(), corpus_config(Some(audit.clone())));

    let cancel = CancellationToken::new();
    cancel.cancel();
    for _ in 0..10 {
        let build = builder.build(&Claim::text("GST students"), 10, &cancel).await;
        assert!(build.evidence.is_empty());
        assert!(build.audit_path.is_none());
    }

    assert_eq!(fetcher.calls(), 0);
    assert!(!audit.exists());
}
