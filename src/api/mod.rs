// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod check;
pub mod config;
pub mod errors;
pub mod http_server;
pub mod results;
pub mod summarize;

pub use check::{CheckApiRequest, CheckApiResponse};
pub use config::ApiConfig;
pub use errors::{ApiError, ApiErrorResponse, ErrorResponse};
pub use http_server::{create_router, start_server, AppState, HealthResponse};
pub use results::{AuditFiles, ResultStore};
pub use summarize::{SummarizeApiRequest, SummarizeApiResponse};
