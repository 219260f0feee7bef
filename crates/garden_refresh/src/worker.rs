//! Periodic driver for the orchestrator.

use crate::Orchestrator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument};

/// Message types for the refresh worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMessage {
    /// Refresh both resources
    Refresh {
        /// Bypass the cache (the rate limit still applies)
        force: bool,
    },
    /// Stop accepting work and wait for in-flight refreshes
    Shutdown,
}

/// Worker that runs a refresh round for every message it receives.
///
/// Rounds are spawned, not awaited in line, so a slow fetch never delays the
/// next tick. Overlapping rounds are allowed; the request timeout keeps them
/// far shorter than the refresh interval.
pub struct RefreshWorker {
    orchestrator: Arc<Orchestrator>,
    rx: mpsc::Receiver<RefreshMessage>,
}

impl RefreshWorker {
    /// Creates a new refresh worker.
    pub fn new(orchestrator: Arc<Orchestrator>, rx: mpsc::Receiver<RefreshMessage>) -> Self {
        Self { orchestrator, rx }
    }

    /// Runs the worker loop until shutdown or until every sender is dropped.
    ///
    /// Returns the number of refresh rounds started.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> usize {
        info!("Refresh worker started");

        let mut rounds = JoinSet::new();
        let mut started = 0usize;

        while let Some(msg) = self.rx.recv().await {
            match msg {
                RefreshMessage::Refresh { force } => {
                    started += 1;
                    let orchestrator = Arc::clone(&self.orchestrator);
                    rounds.spawn(async move {
                        let (stats, commands) = orchestrator.refresh_all(force).await;
                        debug!(%stats, %commands, "Refresh round finished");
                    });
                }
                RefreshMessage::Shutdown => {
                    info!("Refresh worker shutting down");
                    break;
                }
            }

            // Reap rounds that already finished so the set does not grow unbounded.
            while let Some(done) = rounds.try_join_next() {
                if let Err(e) = done {
                    error!(error = ?e, "Refresh round panicked");
                }
            }
        }

        while let Some(done) = rounds.join_next().await {
            if let Err(e) = done {
                error!(error = ?e, "Refresh round panicked");
            }
        }

        info!(rounds = started, "Refresh worker stopped");
        started
    }
}

/// Ticker that asks the worker for a refresh on a fixed period.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    period: Duration,
    force_first: bool,
}

impl RefreshScheduler {
    /// Creates a scheduler ticking every `period`. The first tick is immediate.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            force_first: false,
        }
    }

    /// Make the first (startup) refresh bypass the cache.
    pub fn with_force_first(mut self, force_first: bool) -> Self {
        self.force_first = force_first;
        self
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the ticker. It stops once the worker's channel closes.
    pub fn spawn(self, tx: mpsc::Sender<RefreshMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut force = self.force_first;

            loop {
                ticker.tick().await;
                if tx.send(RefreshMessage::Refresh { force }).await.is_err() {
                    error!("Refresh worker channel closed");
                    break;
                }
                force = false;
            }
        })
    }
}
