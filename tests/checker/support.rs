// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Test doubles for driving a FactChecker without network or model

#![allow(dead_code)]

use async_trait::async_trait;
use factcheck_node::checker::FactChecker;
use factcheck_node::corpus::{CorpusBuilder, CorpusConfig, EvidenceItem};
use factcheck_node::intake::ClaimIntake;
use factcheck_node::judge::{Judge, JudgeError, SourceAssessment, Verdict, VerdictLabel};
use factcheck_node::search::content::{FetchResult, FetchStatus, PageFetcher};
use factcheck_node::search::{
    SearchConfig, SearchError, SearchProvider, SearchResult, SearchService,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const A: &str = "https://news.example/a";
pub const B: &str = "https://news.example/b";
pub const C: &str = "https://factcheck.example/c";
pub const ARTICLE: &str = "https://news.example/article";

pub const PAGE_A: &str = "<html><body><h1>GST exemption</h1><p>School fees are exempt.</p></body></html>";
pub const PAGE_C: &str = "<html><body><h2>Fact check</h2><p>No 28% GST on students.</p></body></html>";
pub const PAGE_ARTICLE: &str = "<html><body><h1>Viral post</h1><p>Students will pay 28% GST on fees. Officials deny it.</p><p>More text.</p></body></html>";

pub struct StaticProvider(pub Vec<&'static str>);

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .0
            .iter()
            .take(num_results)
            .map(|url| SearchResult {
                title: String::new(),
                url: url.to_string(),
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

/// Serves fixed bodies; anything else is a 404
pub struct MapFetcher(pub HashMap<&'static str, &'static str>);

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult {
        match self.0.get(url) {
            Some(body) => FetchResult::ok(body.to_string()),
            None => FetchResult::failed(FetchStatus::NotFound),
        }
    }
}

/// How the scripted judge answers
#[derive(Clone)]
pub enum JudgeScript {
    Verdict(VerdictLabel, u8),
    Fail,
    Hang,
}

/// Scripted judge that records what it was shown
pub struct ScriptedJudge {
    pub script: JudgeScript,
    /// Accuracy per source URL
    pub accuracy: HashMap<&'static str, u8>,
    pub judged: Mutex<Vec<(String, String)>>,
    pub assessed: AtomicUsize,
}

impl ScriptedJudge {
    pub fn new(script: JudgeScript) -> Self {
        Self {
            script,
            accuracy: HashMap::new(),
            judged: Mutex::new(Vec::new()),
            assessed: AtomicUsize::new(0),
        }
    }

    pub fn with_accuracy(mut self, url: &'static str, accuracy: u8) -> Self {
        self.accuracy.insert(url, accuracy);
        self
    }

    pub fn judge_calls(&self) -> usize {
        self.judged.lock().unwrap().len()
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn judge(&self, corpus_text: &str, claim: &str) -> Result<Verdict, JudgeError> {
        self.judged
            .lock()
            .unwrap()
            .push((corpus_text.to_string(), claim.to_string()));
        match &self.script {
            JudgeScript::Verdict(label, confidence) => Ok(Verdict {
                label: *label,
                confidence: *confidence,
                summary: "Scripted verdict.".to_string(),
            }),
            JudgeScript::Fail => Err(JudgeError::Request(
                "connection refused at 10.0.0.5:8000".to_string(),
            )),
            JudgeScript::Hang => {
                std::future::pending::<()>().await;
                Err(JudgeError::Unavailable)
            }
        }
    }

    async fn assess_source(
        &self,
        _headline: &str,
        item: &EvidenceItem,
    ) -> Result<SourceAssessment, JudgeError> {
        self.assessed.fetch_add(1, Ordering::SeqCst);
        // Later ranks answer first
        tokio::time::sleep(Duration::from_millis(50 / (item.rank as u64 + 1))).await;
        Ok(SourceAssessment {
            url: item.url.clone(),
            summary: format!("About {}", item.url),
            accuracy: self.accuracy.get(item.url.as_str()).copied(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn pages() -> HashMap<&'static str, &'static str> {
    HashMap::from([(A, PAGE_A), (C, PAGE_C), (ARTICLE, PAGE_ARTICLE)])
}

pub fn checker_with(
    urls: Vec<&'static str>,
    judge: Option<Arc<dyn Judge>>,
    audit_path: Option<PathBuf>,
) -> FactChecker {
    let config = CorpusConfig {
        audit_path,
        ..CorpusConfig::default()
    };
    checker_with_config(urls, judge, config)
}

pub fn checker_with_config(
    urls: Vec<&'static str>,
    judge: Option<Arc<dyn Judge>>,
    config: CorpusConfig,
) -> FactChecker {
    let fetcher: Arc<dyn PageFetcher> = Arc::new(MapFetcher(pages()));
    let search = Arc::new(SearchService::with_providers(
        SearchConfig::default(),
        vec![Box::new(StaticProvider(urls))],
    ));
    let builder = CorpusBuilder::new(search, fetcher.clone(), config, Duration::from_secs(2));

    FactChecker::new(ClaimIntake::text_only(), builder, fetcher, judge)
        .with_judge_timeout(Duration::from_millis(300))
}
