// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use factcheck_node::{
    api::{start_server, AppState},
    AppConfig, FactChecker,
};
use std::{env, path::PathBuf};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config_path = env::var("FACTCHECK_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    tracing::info!(
        "Starting fact-check node v{} (search enabled: {}, judge: {})",
        env!("CARGO_PKG_VERSION"),
        config.search.enabled,
        config.judge.endpoint.as_deref().unwrap_or("none")
    );

    let checker = FactChecker::from_config(&config)?;
    let state = AppState::new(checker, config.api.result_capacity);

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
        shutdown.cancel();
    });

    start_server(&config.api, state).await
}
