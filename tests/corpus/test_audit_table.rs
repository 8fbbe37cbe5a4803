// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Audit table written by the corpus builder

use factcheck_node::corpus::FETCH_FAILED_SENTINEL;
use factcheck_node::intake::Claim;
use factcheck_node::search::content::FetchStatus;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::support::*;

const A: &str = "https://news.example/a";
const B: &str = "https://news.example/b";
const C: &str = "https://factcheck.example/c";

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_one_row_per_candidate_in_rank_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web_content_summary.csv");
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Status(FetchStatus::FetchError)),
        (C, Page::Html(PAGE_C)),
    ]));
    let builder = builder(&[A, B, C], fetcher, corpus_config(Some(path.clone())));

    let build = builder
        .build(&Claim::text("GST on school fees"), 10, &CancellationToken::new())
        .await;
    assert_eq!(build.audit_path.as_deref(), Some(path.as_path()));

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec!["URL", "Important Content"]);
    assert_eq!(rows[1][0], A);
    assert_eq!(rows[2], vec![B, FETCH_FAILED_SENTINEL]);
    assert_eq!(rows[3][0], C);
    assert_eq!(rows[3][1], "Fact check | No 28% GST on students. CBIC clarified.");
}

#[tokio::test]
async fn test_timed_out_fetch_recorded_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.csv");
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A, Page::Html(PAGE_A)),
        (B, Page::Slow(Duration::from_secs(30), PAGE_A)),
    ]));
    let builder = factcheck_node::corpus::CorpusBuilder::new(
        search_service(StaticProvider::new(&[A, B])),
        fetcher,
        corpus_config(Some(path.clone())),
        Duration::from_millis(50),
    );

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert_eq!(build.corpus.urls(), vec![A]);
    let rows = read_rows(&path);
    assert_eq!(rows[2], vec![B, FETCH_FAILED_SENTINEL]);
}

#[tokio::test]
async fn test_audit_table_overwritten_each_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.csv");

    let first = builder(
        &[A, B, C],
        Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))])),
        corpus_config(Some(path.clone())),
    );
    first
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;
    assert_eq!(read_rows(&path).len(), 4);

    let second = builder(
        &[C],
        Arc::new(ScriptedFetcher::new(vec![(C, Page::Html(PAGE_C))])),
        corpus_config(Some(path.clone())),
    );
    second
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], C);
}

#[tokio::test]
async fn test_no_table_without_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.csv");
    let builder = builder(
        &[],
        Arc::new(ScriptedFetcher::new(Vec::new())),
        corpus_config(Some(path.clone())),
    );

    let build = builder
        .build(&Claim::text("GST students"), 10, &CancellationToken::new())
        .await;

    assert!(build.corpus.is_empty());
    assert!(build.audit_path.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_per_run_audit_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = corpus_config(None);
    config.audit_dir = dir.path().join("audit");
    let target = config.audit_path_for("req-42");

    let builder = builder(
        &[A],
        Arc::new(ScriptedFetcher::new(vec![(A, Page::Html(PAGE_A))])),
        config,
    );
    let build = builder
        .build_with_audit(
            &Claim::text("GST students"),
            10,
            &CancellationToken::new(),
            Some(&target),
        )
        .await;

    assert_eq!(build.audit_path.as_deref(), Some(target.as_path()));
    assert!(target.ends_with("req-42.csv"));
    assert_eq!(read_rows(&target).len(), 2);
}

#[tokio::test]
async fn test_timeout_empty_and_real_page() {
    const A_COM: &str = "https://a.com/";
    const B_COM: &str = "https://b.com/";
    const C_COM: &str = "https://c.com/";

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web_content_summary.csv");
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        (A_COM, Page::Slow(Duration::from_secs(30), PAGE_A)),
        (B_COM, Page::Html(PAGE_EMPTY)),
        (C_COM, Page::Html(PAGE_C)),
    ]));
    let builder = factcheck_node::corpus::CorpusBuilder::new(
        search_service(StaticProvider::new(&[A_COM, B_COM, C_COM])),
        fetcher,
        corpus_config(Some(path.clone())),
        Duration::from_millis(50),
    );

    let build = builder
        .build(
            &Claim::text("Attendance rule GST fee hike"),
            10,
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(build.corpus.urls(), vec![C_COM]);
    assert_eq!(build.evidence.len(), 3);

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1], vec![A_COM, FETCH_FAILED_SENTINEL]);
    assert_eq!(rows[2], vec![B_COM, "No significant content found."]);
    assert_eq!(rows[3][0], C_COM);
}
