// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text extraction from claim images

use async_trait::async_trait;
use tracing::info;

use super::config::IntakeConfig;
use super::image::{strip_data_url, validate_base64_image};
use crate::llm::{ChatClient, ChatMessage};

const OCR_PROMPT: &str = "Extract all text from this image. Return only the extracted text, preserving the original line order. If no text is found, respond with an empty string.";

/// Trait for OCR backends
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Text found in a base64 image; `format` is a hint such as "png"
    async fn extract_text(&self, image_base64: &str, format: &str) -> anyhow::Result<String>;

    fn name(&self) -> &str;
}

/// OCR through a vision chat model
pub struct VlmOcrEngine {
    client: ChatClient,
}

impl VlmOcrEngine {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Build from configuration; `Ok(None)` when no endpoint is configured
    pub fn from_config(config: &IntakeConfig, timeout: std::time::Duration) -> anyhow::Result<Option<Self>> {
        let Some(endpoint) = &config.ocr_endpoint else {
            return Ok(None);
        };
        let client = ChatClient::new(endpoint, &config.ocr_model, None, timeout)?;
        Ok(Some(Self::new(client)))
    }
}

#[async_trait]
impl OcrEngine for VlmOcrEngine {
    async fn extract_text(&self, image_base64: &str, format: &str) -> anyhow::Result<String> {
        let detected = validate_base64_image(image_base64)?;
        let payload = strip_data_url(image_base64.trim());
        let format = if format.trim().is_empty() {
            detected.mime_subtype()
        } else {
            format.trim()
        };

        let messages = [ChatMessage::user_with_image(OCR_PROMPT, payload, format)];
        let completion = self.client.complete(&messages, 2048, 0.1).await?;

        info!(
            "OCR extracted {} chars in {}ms",
            completion.text.len(),
            completion.processing_time_ms
        );
        Ok(completion.text.trim().to_string())
    }

    fn name(&self) -> &str {
        self.client.model_name()
    }
}
