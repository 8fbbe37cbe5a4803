// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Article summarize API endpoint

pub mod handler;
pub mod request;
pub mod response;

pub use handler::summarize_handler;
pub use request::SummarizeApiRequest;
pub use response::SummarizeApiResponse;
