// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Summarize API endpoint handler

use axum::{extract::State, Json};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::SummarizeApiRequest;
use super::response::SummarizeApiResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;
use crate::checker::CheckOptions;

/// POST /v1/summarize - Judge an article and assess sources for its title
///
/// # Errors
/// - 400 Bad Request: invalid URL, or no article text on the page
/// - 404 Not Found: the article URL returned 404/410
/// - 503 Service Unavailable: the article could not be fetched
pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeApiRequest>,
) -> Result<Json<SummarizeApiResponse>, ApiErrorResponse> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Err(e) = request.validate() {
        warn!(request_id = %request_id, "Summarize validation failed: {}", e);
        return Err(e.with_request_id(request_id));
    }

    let options = CheckOptions {
        request_id: Some(request_id.clone()),
        num_results: request.num_results,
        assess_sources: true,
        audit_path: Some(
            state
                .checker
                .corpus_builder()
                .config()
                .audit_path_for(&request_id),
        ),
    };

    let cancel = state.shutdown.child_token();
    let report = state
        .checker
        .summarize(request.url.trim(), request.title.as_deref(), options, &cancel)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(request_id.clone()))?;

    if let Some(path) = report.related.as_ref().and_then(|b| b.audit_path.as_ref()) {
        state.audit_files.record(path).await;
    }

    info!(
        request_id = %request_id,
        "Summarized {} ({} chars, {} assessments)",
        report.url,
        report.article_chars,
        report.assessments.len()
    );
    Ok(Json(SummarizeApiResponse::from(report)))
}
