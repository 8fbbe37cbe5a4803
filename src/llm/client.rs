// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat client for OpenAI-compatible `/v1/chat/completions` endpoints

use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

/// One message of a chat request
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

impl ChatMessage {
    pub fn system(text: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: serde_json::Value::String(text.to_string()),
        }
    }

    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: serde_json::Value::String(text.to_string()),
        }
    }

    /// User message carrying a prompt and an inline base64 image
    pub fn user_with_image(prompt: &str, base64_image: &str, format: &str) -> Self {
        let data_url = format!("data:image/{};base64,{}", format, base64_image);
        Self {
            role: "user".to_string(),
            content: serde_json::json!([
                {"type": "text", "text": prompt},
                {"type": "image_url", "image_url": {"url": data_url}}
            ]),
        }
    }
}

#[derive(serde::Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Text of the first choice plus accounting
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub text: String,
    pub model: String,
    pub processing_time_ms: u64,
    pub tokens_used: u32,
}

/// Client for an OpenAI-compatible chat service
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model_name: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(
        endpoint: &str,
        model_name: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Chat client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
            api_key,
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Get the endpoint base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check if the chat service answers its health route
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Chat health check failed: {}", e);
                false
            }
        }
    }

    /// Run one chat completion and return the first choice's text
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<ChatCompletion> {
        let start = Instant::now();
        let request = ChatRequest {
            model: &self.model_name,
            messages,
            max_tokens,
            temperature,
        };

        let mut builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("chat request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("chat endpoint returned {}: {}", status, truncate(&body, 200));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("chat response was not valid JSON")?;
        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let tokens_used = chat_response.usage.map(|u| u.total_tokens).unwrap_or(0);

        Ok(ChatCompletion {
            text,
            model: self.model_name.clone(),
            processing_time_ms: start.elapsed().as_millis() as u64,
            tokens_used,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
