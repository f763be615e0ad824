//! `url-checkr` — score URLs for phishing risk from the command line.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load rule lists and backend settings ([`url_checkr::config::load_config`]).
//! 3. Pick a classifier: remote when an endpoint is configured, the built-in engine otherwise.
//! 4. Check every URL concurrently ([`url_checkr::action::check_many`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (all safe) or `1` (anything malicious, invalid or failed).

mod cli;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cli::{Cli, ReportFormat};
use url_checkr::action::check_many;
use url_checkr::backend::remote::RemoteBackend;
use url_checkr::backend::{Classifier, LocalBackend};
use url_checkr::config::load_config;
use url_checkr::models::CheckOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.backend.timeout());

    let classifier: Box<dyn Classifier> =
        match cli.backend_url.clone().or(config.backend.endpoint.clone()) {
            Some(endpoint) => Box::new(RemoteBackend::new(endpoint, timeout)?),
            None => Box::new(LocalBackend::new(config.lists.clone())),
        };
    info!(backend = classifier.name(), urls = cli.urls.len(), "starting checks");

    let json = matches!(cli.report, ReportFormat::Json);
    let pb = if !cli.quiet && !json {
        let pb = ProgressBar::new(cli.urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let outcomes = check_many(classifier.as_ref(), cli.urls.as_slice(), timeout, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })
    .await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&outcomes, cli.verbose, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }

    if !all_clear(&outcomes) {
        std::process::exit(1);
    }

    Ok(())
}

fn all_clear(outcomes: &[CheckOutcome]) -> bool {
    outcomes
        .iter()
        .all(|o| matches!(o, CheckOutcome::Success { analysis, .. } if !analysis.is_malicious))
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // RUST_LOG controls verbosity; logs go to stderr so stdout stays parseable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
