// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fact-check node CLI
#[derive(Parser, Debug)]
#[command(name = "factcheck-cli")]
#[command(version)]
#[command(about = "Check claims against web evidence from the command line", long_about = None)]
pub struct Cli {
    /// TOML configuration file (defaults to environment variables)
    #[arg(long, global = true, env = "FACTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the search keywords of a text
    Keywords(commands::KeywordsArgs),

    /// Search the web for a text's keywords and print candidate URLs
    Search(commands::SearchArgs),

    /// Check a claim and print the verdict
    Check(commands::CheckArgs),

    /// Print the important content of a saved HTML page
    Extract(commands::ExtractArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Keywords(args) => commands::keywords(args),
        Commands::Search(args) => commands::search(args, config).await,
        Commands::Check(args) => commands::check(args, config).await,
        Commands::Extract(args) => commands::extract(args),
    }
}
