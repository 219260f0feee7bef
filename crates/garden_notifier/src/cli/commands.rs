//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Garden Notifier site refresher - keeps bot stats and commands current from a cache
#[derive(Parser, Debug)]
#[command(name = "garden-notifier")]
#[command(about = "Cache-first refresher for Garden Notifier bot stats and commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML file with refresh settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path of the persistent cache file
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Override the bot API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Refresh once and exit instead of refreshing periodically
    #[arg(long)]
    pub once: bool,

    /// Bypass the cache on the first refresh (the rate limit still applies)
    #[arg(long)]
    pub force: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
