// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Check API endpoint handlers

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::CheckApiRequest;
use super::response::CheckApiResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;
use crate::checker::CheckOptions;
use crate::judge::AccuracyReport;

/// POST /v1/check - Check a claim against web evidence
///
/// # Request
/// - exactly one of `text`, `image` (+ optional `format`), `youtubeUrl`
/// - `numResults`: candidate URLs to fetch (1-20, default 10)
/// - `assessSources`: assess each usable source (default false)
///
/// # Errors
/// - 400 Bad Request: no input, several inputs, or invalid parameters
/// - 503 Service Unavailable: OCR or transcripts not configured
/// - 500 Internal Server Error: OCR failed
pub async fn check_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckApiRequest>,
) -> Result<Json<CheckApiResponse>, ApiErrorResponse> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!(request_id = %request_id, "Check request");

    if let Err(e) = request.validate() {
        warn!(request_id = %request_id, "Check validation failed: {}", e);
        return Err(e.with_request_id(request_id));
    }
    let input = request
        .input()
        .ok_or_else(|| ApiError::InvalidRequest("No claim input".to_string()))?;

    let options = CheckOptions {
        request_id: Some(request_id.clone()),
        num_results: request.num_results,
        assess_sources: request.assess_sources,
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
        .check(input, options, &cancel)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(request_id.clone()))?;

    if let Some(path) = &report.audit_path {
        state.audit_files.record(path).await;
    }
    let response = CheckApiResponse::from(report);
    info!(
        request_id = %response.request_id,
        "Check complete: {} sources in {}ms",
        response.corpus.len(),
        response.timings.total_ms
    );
    state.results.insert(response.clone()).await;

    Ok(Json(response))
}

/// GET /v1/check/:id - A stored check result
pub async fn get_check_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<CheckApiResponse>, ApiErrorResponse> {
    state
        .results
        .get(&request_id)
        .await
        .map(Json)
        .ok_or_else(|| unknown_check(request_id))
}

/// GET /v1/check/:id/accuracy - Per-source accuracy of a stored check
pub async fn accuracy_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<AccuracyReport>, ApiErrorResponse> {
    state
        .results
        .get(&request_id)
        .await
        .map(|response| Json(response.accuracy_report()))
        .ok_or_else(|| unknown_check(request_id))
}

fn unknown_check(request_id: String) -> ApiErrorResponse {
    ApiError::NotFound(format!("No check result for '{}'", request_id)).with_request_id(request_id)
}
