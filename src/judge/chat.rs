// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Judge backed by an OpenAI-compatible chat model

use async_trait::async_trait;
use tracing::debug;

use super::config::JudgeConfig;
use super::parse::{parse_assessment, parse_verdict};
use super::types::{JudgeError, SourceAssessment, Verdict};
use super::Judge;
use crate::corpus::EvidenceItem;
use crate::llm::{ChatClient, ChatMessage};

const VERDICT_SYSTEM_PROMPT: &str = "You are a news fact checker. You receive a claim and text scraped from independent web sources. Decide whether the sources support the claim. Answer with a single JSON object and nothing else: {\"verdict\": \"true|false|misleading|unverified\", \"confidence\": 0-100, \"summary\": \"at most 100 words\"}.";

const ASSESS_SYSTEM_PROMPT: &str = "You are a news fact checker. You receive a headline and the content of one web source. Summarize the source in at most 50 words and rate, as a percentage, how accurate the headline is according to this source. Answer with a single JSON object and nothing else: {\"summary\": \"...\", \"accuracy\": 0-100}.";

/// [`Judge`] that prompts a chat model and parses its JSON answer
pub struct ChatJudge {
    client: ChatClient,
    max_tokens: u32,
    temperature: f32,
}

impl ChatJudge {
    pub fn new(client: ChatClient, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            max_tokens,
            temperature,
        }
    }

    /// Build from configuration; `Ok(None)` when no endpoint is configured
    pub fn from_config(config: &JudgeConfig) -> anyhow::Result<Option<Self>> {
        let Some(endpoint) = &config.endpoint else {
            return Ok(None);
        };
        let client = ChatClient::new(
            endpoint,
            &config.model,
            config.api_key.clone(),
            config.timeout(),
        )?;
        Ok(Some(Self::new(client, config.max_tokens, config.temperature)))
    }

    async fn ask(&self, system: &str, user: &str) -> Result<String, JudgeError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        let completion = self
            .client
            .complete(&messages, self.max_tokens, self.temperature)
            .await
            .map_err(|e| JudgeError::Request(format!("{:#}", e)))?;

        debug!(
            "Judge answered in {}ms ({} tokens)",
            completion.processing_time_ms, completion.tokens_used
        );
        Ok(completion.text)
    }
}

fn verdict_prompt(corpus_text: &str, claim: &str) -> String {
    format!("Claim: {}\n\nSources:\n{}", claim.trim(), corpus_text)
}

fn assess_prompt(headline: &str, item: &EvidenceItem) -> String {
    format!(
        "Headline: {}\n\nSource ({}):\n{}",
        headline.trim(),
        item.url,
        item.content
    )
}

#[async_trait]
impl Judge for ChatJudge {
    async fn judge(&self, corpus_text: &str, claim: &str) -> Result<Verdict, JudgeError> {
        let answer = self
            .ask(VERDICT_SYSTEM_PROMPT, &verdict_prompt(corpus_text, claim))
            .await?;
        parse_verdict(&answer)
    }

    async fn assess_source(
        &self,
        headline: &str,
        item: &EvidenceItem,
    ) -> Result<SourceAssessment, JudgeError> {
        let answer = self
            .ask(ASSESS_SYSTEM_PROMPT, &assess_prompt(headline, item))
            .await?;
        parse_assessment(&item.url, &answer)
    }

    fn name(&self) -> &str {
        self.client.model_name()
    }
}
