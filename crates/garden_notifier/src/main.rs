//! Garden Notifier refresher binary.
//!
//! Renders the bot stats and command list in the terminal, refreshing them
//! from the bot API through the same cache the site uses.

use clap::Parser;
use garden_notifier::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run};

    // Parse command-line arguments
    let cli = Cli::parse();

    init_observability_with_config(
        ObservabilityConfig::new(cli.verbose).with_json_logs(cli.json_logs),
    )?;

    run(cli).await?;

    Ok(())
}
