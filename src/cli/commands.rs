// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::checker::{CheckOptions, CheckOutcome, CheckReport, FactChecker};
use crate::config::AppConfig;
use crate::intake::ClaimInput;
use crate::search::content::extract_important_content;
use crate::search::{extract_keywords, SearchService};

/// Arguments for the keywords command
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Claim text
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Claim text
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Number of URLs to return
    #[arg(short = 'n', long, default_value_t = 10)]
    pub num_results: usize,
}

/// Arguments for the check command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "youtube", "image"])))]
pub struct CheckArgs {
    /// Claim text
    #[arg(long)]
    pub text: Option<String>,

    /// YouTube video URL; its transcript is the claim
    #[arg(long)]
    pub youtube: Option<String>,

    /// Image file; its OCR text is the claim
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Number of candidate URLs to fetch
    #[arg(short = 'n', long, default_value_t = 10)]
    pub num_results: usize,

    /// Audit table path (defaults to the configured path)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Assess every usable source against the claim
    #[arg(long)]
    pub assess: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Saved HTML file
    pub file: PathBuf,
}

pub fn keywords(args: KeywordsArgs) -> Result<()> {
    let keywords = extract_keywords(&args.text.join(" "));
    if keywords.is_empty() {
        println!("(no keywords)");
    } else {
        println!("{}", keywords.join(" "));
    }
    Ok(())
}

pub async fn search(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let service = SearchService::new(config.search)?;

    let keywords = extract_keywords(&args.text.join(" "));
    let urls = service.search(&keywords, args.num_results).await;
    if urls.is_empty() {
        println!("No results for '{}'", keywords.join(" "));
    }
    for (rank, url) in urls.iter().enumerate() {
        println!("{:>2}. {}", rank + 1, url);
    }
    Ok(())
}

pub async fn check(args: CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let checker = FactChecker::from_config(&config)?;

    let input = if let Some(text) = args.text {
        ClaimInput::Text(text)
    } else if let Some(url) = args.youtube {
        ClaimInput::YouTube { url }
    } else if let Some(path) = args.image {
        read_image(&path)?
    } else {
        anyhow::bail!("One of --text, --youtube or --image is required");
    };

    let options = CheckOptions {
        request_id: None,
        num_results: args.num_results,
        assess_sources: args.assess,
        audit_path: args.out.or_else(|| config.corpus.audit_path.clone()),
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping check");
            ctrl_c.cancel();
        }
    });

    let report = checker.check(input, options, &cancel).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub fn extract(args: ExtractArgs) -> Result<()> {
    let html = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    println!("{}", extract_important_content(&html));
    Ok(())
}

fn read_image(path: &Path) -> Result<ClaimInput> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    Ok(ClaimInput::Image {
        data: STANDARD.encode(bytes),
        format,
    })
}

fn print_report(report: &CheckReport) {
    println!("Claim:    {}", report.claim.as_str());
    println!("Keywords: {}", report.keywords.join(" "));
    println!(
        "Sources:  {} usable of {} fetched",
        report.corpus.len(),
        report.evidence.len()
    );
    for item in &report.evidence {
        println!("  [{:?}] {}", item.status, item.url);
    }

    match &report.outcome {
        CheckOutcome::NoQuery => println!("Verdict:  no searchable keywords in the claim"),
        CheckOutcome::InsufficientEvidence => println!("Verdict:  not enough evidence found"),
        CheckOutcome::Judged(verdict) => {
            println!("Verdict:  {} ({}% confidence)", verdict.label, verdict.confidence);
            println!("Summary:  {}", verdict.summary);
        }
        CheckOutcome::JudgeUnavailable => println!("Verdict:  no judge configured"),
        CheckOutcome::JudgeFailed { message } => println!("Verdict:  {}", message),
    }

    if let Some(accuracy) = &report.accuracy {
        println!("Average source accuracy: {:.1}%", accuracy.average_accuracy);
    }
    if let Some(path) = &report.audit_path {
        println!("Audit table: {}", path.display());
    }
}
