// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::check::{accuracy_handler, check_handler, get_check_handler};
use super::config::ApiConfig;
use super::results::{AuditFiles, ResultStore};
use super::summarize::summarize_handler;
use crate::checker::FactChecker;

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<FactChecker>,
    pub results: Arc<ResultStore>,
    /// Per-request audit tables, bounded like `results`
    pub audit_files: Arc<AuditFiles>,
    /// Cancelled on shutdown; every request runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(checker: FactChecker, result_capacity: usize) -> Self {
        Self {
            checker: Arc::new(checker),
            results: Arc::new(ResultStore::new(result_capacity)),
            audit_files: Arc::new(AuditFiles::new(result_capacity)),
            shutdown: CancellationToken::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Judge backend name, if one is configured
    pub judge: Option<String>,
    pub ocr: bool,
    pub transcripts: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/check", post(check_handler))
        .route("/v1/check/:id", get(get_check_handler))
        .route("/v1/check/:id/accuracy", get(accuracy_handler))
        .route("/v1/summarize", post(summarize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API until `state.shutdown` is cancelled
pub async fn start_server(config: &ApiConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let intake = state.checker.intake();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        judge: state.checker.judge_name().map(str::to_string),
        ocr: intake.has_ocr(),
        transcripts: intake.has_transcripts(),
    })
}
