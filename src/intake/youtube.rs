// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YouTube transcripts as claim text
//!
//! A video URL is reduced to its ID, captions are fetched for the first
//! language that has them, and caption text is joined in start-time order.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// One caption line
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// Transcript errors
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("No captions for video {video_id} in language {language}")]
    NoCaptions { video_id: String, language: String },

    #[error("Transcript request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcript endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Invalid transcript endpoint: {0}")]
    Endpoint(String),

    #[error("No transcript available for video {video_id} (tried {tried})")]
    Unavailable { video_id: String, tried: String },
}

/// Source of caption tracks
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>, TranscriptError>;
}

/// Captions from YouTube's timedtext XML endpoint
pub struct TimedTextSource {
    client: Client,
    base_url: String,
}

impl TimedTextSource {
    pub fn new(timeout: Duration) -> Result<Self, TranscriptError> {
        Self::with_base_url(TIMEDTEXT_URL, timeout)
    }

    /// Use another timedtext-compatible endpoint
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, TranscriptError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl TranscriptSource for TimedTextSource {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| TranscriptError::Endpoint(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("v", video_id)
            .append_pair("lang", language);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::Status(status.as_u16()));
        }

        let xml = response.text().await?;
        let entries = parse_timedtext(&xml);
        if entries.is_empty() {
            return Err(TranscriptError::NoCaptions {
                video_id: video_id.to_string(),
                language: language.to_string(),
            });
        }
        Ok(entries)
    }
}

/// Caption entries of a timedtext document
///
/// `<text start=".." dur="..">` elements; entities are decoded by the parser.
pub fn parse_timedtext(xml: &str) -> Vec<CaptionEntry> {
    let Ok(selector) = Selector::parse("text") else {
        return Vec::new();
    };
    let document = Html::parse_fragment(xml);

    document
        .select(&selector)
        .filter_map(|element| {
            let start = element.value().attr("start")?.parse().ok()?;
            let duration = element
                .value()
                .attr("dur")
                .and_then(|d| d.parse().ok())
                .unwrap_or(0.0);
            let text = element.text().collect::<String>();
            Some(CaptionEntry {
                start,
                duration,
                text,
            })
        })
        .collect()
}

/// Fetches a transcript, falling back across languages
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(source: Arc<dyn TranscriptSource>, languages: Vec<String>) -> Self {
        Self { source, languages }
    }

    /// Transcript text of `video_id` in the first language that has captions
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<String, TranscriptError> {
        for language in &self.languages {
            match self.source.fetch(video_id, language).await {
                Ok(entries) => {
                    let text = join_captions(entries);
                    if !text.is_empty() {
                        debug!("Transcript for {} in {}: {} chars", video_id, language, text.len());
                        return Ok(text);
                    }
                }
                Err(e) => warn!("Transcript for {} in {} failed: {}", video_id, language, e),
            }
        }

        Err(TranscriptError::Unavailable {
            video_id: video_id.to_string(),
            tried: self.languages.join(","),
        })
    }
}

/// Caption text in start-time order, whitespace normalised, single-space joined
fn join_captions(mut entries: Vec<CaptionEntry>) -> String {
    entries.sort_by(|a, b| a.start.total_cmp(&b.start));
    entries
        .iter()
        .flat_map(|e| e.text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Video ID of a YouTube URL
///
/// Accepts `watch?v=`, `youtu.be/`, `/shorts/`, `/embed/` and `/live/` forms.
///
/// ```
/// use factcheck_node::intake::youtube::parse_video_id;
///
/// assert_eq!(parse_video_id("https://youtu.be/wgi1IDDOHUc?t=3").as_deref(), Some("wgi1IDDOHUc"));
/// assert_eq!(parse_video_id("https://example.com/watch?v=wgi1IDDOHUc"), None);
/// ```
pub fn parse_video_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = Url::parse(raw)
        .or_else(|_| Url::parse(&format!("https://{}", raw)))
        .ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = match host {
        "youtu.be" => segments.next()?.to_string(),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            "shorts" | "embed" | "live" | "v" => segments.next()?.to_string(),
            _ => return None,
        },
        _ => return None,
    };

    is_video_id(&candidate).then_some(candidate)
}

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
