// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Claim intake
//!
//! Resolves user input (text, an image, or a YouTube URL) into a [`Claim`].
//! OCR and transcripts are pluggable; a missing capability is reported as
//! [`IntakeError::CapabilityUnavailable`].

pub mod claim;
pub mod config;
pub mod image;
pub mod ocr;
pub mod youtube;

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use claim::{Claim, ClaimOrigin};
pub use config::IntakeConfig;
pub use image::{validate_base64_image, ImageError, ImageKind};
pub use ocr::{OcrEngine, VlmOcrEngine};
pub use youtube::{
    parse_video_id, CaptionEntry, TimedTextSource, TranscriptError, TranscriptFetcher,
    TranscriptSource,
};

/// What the user submitted
#[derive(Debug, Clone)]
pub enum ClaimInput {
    Text(String),
    Image { data: String, format: String },
    YouTube { url: String },
}

/// Intake errors
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Claim text is empty")]
    EmptyClaim,

    #[error("Not a YouTube video URL: {0}")]
    InvalidVideoUrl(String),

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),

    #[error("{0} is not configured on this host")]
    CapabilityUnavailable(&'static str),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

/// Turns user input into a claim
#[derive(Clone, Default)]
pub struct ClaimIntake {
    ocr: Option<Arc<dyn OcrEngine>>,
    transcripts: Option<Arc<TranscriptFetcher>>,
}

impl ClaimIntake {
    pub fn new(
        ocr: Option<Arc<dyn OcrEngine>>,
        transcripts: Option<Arc<TranscriptFetcher>>,
    ) -> Self {
        Self { ocr, transcripts }
    }

    /// Text-only intake
    pub fn text_only() -> Self {
        Self::default()
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    pub fn has_transcripts(&self) -> bool {
        self.transcripts.is_some()
    }

    /// Resolve input into a non-blank claim
    pub async fn resolve(&self, input: ClaimInput) -> Result<Claim, IntakeError> {
        let claim = match input {
            ClaimInput::Text(text) => Claim::text(text.trim()),
            ClaimInput::Image { data, format } => {
                validate_base64_image(&data)?;
                let ocr = self
                    .ocr
                    .as_ref()
                    .ok_or(IntakeError::CapabilityUnavailable("OCR"))?;
                let text = ocr
                    .extract_text(&data, &format)
                    .await
                    .map_err(|e| IntakeError::Ocr(format!("{:#}", e)))?;
                info!("OCR produced {} chars via {}", text.len(), ocr.name());
                Claim::new(text, ClaimOrigin::Image)
            }
            ClaimInput::YouTube { url } => {
                let video_id =
                    parse_video_id(&url).ok_or_else(|| IntakeError::InvalidVideoUrl(url.clone()))?;
                let transcripts = self
                    .transcripts
                    .as_ref()
                    .ok_or(IntakeError::CapabilityUnavailable("Transcript fetching"))?;
                let text = transcripts.fetch_transcript(&video_id).await?;
                Claim::new(text, ClaimOrigin::Video { video_id })
            }
        };

        if claim.is_blank() {
            return Err(IntakeError::EmptyClaim);
        }
        Ok(claim)
    }
}
