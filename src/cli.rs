use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "url-checkr",
    about = "Score URLs for phishing, spoofing and typosquatting risk",
    version
)]
pub struct Cli {
    /// URLs or bare domains to check
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Config file [default: ./.url-checkr/config.toml, fallback ~/.config/url-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Send URLs to a remote classification backend instead of the built-in engine
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Per-URL classification timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Print the full report for every URL, not just flagged ones
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
