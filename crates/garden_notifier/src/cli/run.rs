//! Refresh runner for the binary.

use super::Cli;
use garden_notifier::{
    ApiClient, CacheStore, ConfigError, FileStore, GardenResult, Orchestrator, RefreshConfig,
    RefreshMessage, RefreshScheduler, RefreshWorker, SystemClock, TerminalPresenter,
    default_state_path,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Build the refresh pipeline from CLI arguments and run it.
///
/// With `--once` a single round runs. Otherwise the pipeline refreshes on the
/// configured interval until Ctrl-C.
pub async fn run(cli: Cli) -> GardenResult<()> {
    let mut config = match &cli.config {
        Some(path) => RefreshConfig::from_file(path)?,
        None => RefreshConfig::default(),
    };
    if let Some(url) = &cli.api_base_url {
        config = config.with_api_base_url(url.as_str());
        config.validate()?;
    }

    let state_path = match cli.state.clone().or_else(default_state_path) {
        Some(path) => path,
        None => {
            return Err(ConfigError::new(
                "No data directory available; pass --state to choose a cache file",
            )
            .into());
        }
    };

    let store = FileStore::open(&state_path)?;
    let cache = Arc::new(CacheStore::new(Arc::new(store), Arc::new(SystemClock)));
    let api = ApiClient::new(config.api_base_url(), config.request_timeout())?;
    let presenter = TerminalPresenter::stdout(cache.clone(), config.clone());

    info!(
        state = %state_path.display(),
        api = %api.base_url(),
        "Starting Garden Notifier refresher"
    );

    let orchestrator = Arc::new(Orchestrator::new(
        cache,
        Arc::new(api),
        Arc::new(presenter),
        config.clone(),
    ));

    if cli.once {
        let (stats, commands) = orchestrator.refresh_all(cli.force).await;
        info!(%stats, %commands, "Refresh complete");
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(16);
    let worker = tokio::spawn(RefreshWorker::new(orchestrator, rx).run());
    let ticker = RefreshScheduler::new(config.refresh_interval())
        .with_force_first(cli.force)
        .spawn(tx.clone());

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C, shutting down");
    }

    ticker.abort();
    if tx.send(RefreshMessage::Shutdown).await.is_err() {
        warn!("Refresh worker already stopped");
    }

    match worker.await {
        Ok(rounds) => info!(rounds, "Refresher stopped"),
        Err(e) => warn!(error = %e, "Refresh worker ended abnormally"),
    }

    Ok(())
}
