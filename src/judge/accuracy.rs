// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-source accuracy figures
//!
//! Judges that predate the JSON contract answer with a sentence containing
//! `Accuracy of news: NN%`; that phrase is still accepted as a fallback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::types::SourceAssessment;

static ACCURACY_PHRASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)accuracy\s+of\s+news\s*:?\s*(\d{1,3})\s*%").ok());

/// Percentage from the legacy `Accuracy of news: NN%` phrase
///
/// Values above 100 are rejected.
pub fn legacy_accuracy(text: &str) -> Option<u8> {
    let regex = ACCURACY_PHRASE.as_ref()?;
    let value: u8 = regex.captures(text)?.get(1)?.as_str().parse().ok()?;
    (value <= 100).then_some(value)
}

/// One point of the accuracy chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracySample {
    pub url: String,
    pub accuracy: Option<u8>,
}

/// Accuracy of every assessed source plus their mean
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    pub samples: Vec<AccuracySample>,
    /// Mean over samples that carry a figure; 0 when none do
    pub average_accuracy: f64,
}

impl AccuracyReport {
    pub fn from_assessments(assessments: &[SourceAssessment]) -> Self {
        let samples: Vec<AccuracySample> = assessments
            .iter()
            .map(|a| AccuracySample {
                url: a.url.clone(),
                accuracy: a.accuracy,
            })
            .collect();

        let figures: Vec<f64> = samples
            .iter()
            .filter_map(|s| s.accuracy.map(f64::from))
            .collect();
        let average_accuracy = if figures.is_empty() {
            0.0
        } else {
            figures.iter().sum::<f64>() / figures.len() as f64
        };

        Self {
            samples,
            average_accuracy,
        }
    }
}
