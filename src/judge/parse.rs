// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parsing of judge answers
//!
//! The judge is asked for a single JSON object. Answers wrapped in a fenced
//! code block or surrounded by prose are accepted; answers with no JSON
//! object fall back to the legacy accuracy phrase.

use serde::Deserialize;

use super::accuracy::legacy_accuracy;
use super::types::{JudgeError, SourceAssessment, Verdict, VerdictLabel};

#[derive(Deserialize)]
struct RawVerdict {
    verdict: String,
    confidence: f64,
    #[serde(default)]
    summary: String,
}

#[derive(Deserialize)]
struct RawAssessment {
    #[serde(default)]
    summary: String,
    accuracy: Option<f64>,
}

/// Parse a claim verdict
pub fn parse_verdict(raw: &str) -> Result<Verdict, JudgeError> {
    if let Some(json) = json_object(raw) {
        if let Ok(parsed) = serde_json::from_str::<RawVerdict>(json) {
            let label = parsed
                .verdict
                .parse::<VerdictLabel>()
                .map_err(JudgeError::malformed)?;
            return Ok(Verdict {
                label,
                confidence: percentage(parsed.confidence, "confidence")?,
                summary: parsed.summary.trim().to_string(),
            });
        }
    }

    match legacy_accuracy(raw) {
        Some(confidence) => Ok(Verdict {
            label: VerdictLabel::Unverified,
            confidence,
            summary: raw.trim().to_string(),
        }),
        None => Err(JudgeError::malformed(
            "no verdict object and no accuracy phrase",
        )),
    }
}

/// Parse a per-source assessment
///
/// Prose with neither JSON nor the legacy phrase is kept as the summary with
/// no accuracy figure; only an empty answer is rejected.
pub fn parse_assessment(url: &str, raw: &str) -> Result<SourceAssessment, JudgeError> {
    if let Some(json) = json_object(raw) {
        if let Ok(parsed) = serde_json::from_str::<RawAssessment>(json) {
            let accuracy = parsed
                .accuracy
                .map(|value| percentage(value, "accuracy"))
                .transpose()?;
            return Ok(SourceAssessment {
                url: url.to_string(),
                summary: parsed.summary.trim().to_string(),
                accuracy,
            });
        }
    }

    let summary = raw.trim();
    if summary.is_empty() {
        return Err(JudgeError::malformed("empty assessment"));
    }
    Ok(SourceAssessment {
        url: url.to_string(),
        summary: summary.to_string(),
        accuracy: legacy_accuracy(raw),
    })
}

fn percentage(value: f64, field: &str) -> Result<u8, JudgeError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(JudgeError::malformed(format!(
            "{} {} outside 0-100",
            field, value
        )));
    }
    Ok(value.round() as u8)
}

/// The JSON object inside `raw`: fenced block contents, else first `{` to last `}`
fn json_object(raw: &str) -> Option<&str> {
    let body = fenced_block(raw).unwrap_or(raw);
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start < end).then(|| &body[start..=end])
}

fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let after = &raw[open + 3..];
    // Skip an info string such as "json"
    let content_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let content = &after[content_start..];
    let close = content.find("```")?;
    Some(&content[..close])
}
