// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI-compatible chat sidecar access
//!
//! Shared by the judge (text prompts) and the OCR engine (image prompts).

pub mod client;

pub use client::{ChatClient, ChatCompletion, ChatMessage};
