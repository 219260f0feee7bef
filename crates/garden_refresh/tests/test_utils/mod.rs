//! Test utilities for refresh tests.
//!
//! Mock API, recording presenter, and a harness wiring them to an in-memory cache.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use garden_cache::{CacheStore, ManualClock, MemoryStore};
use garden_client::BotApi;
use garden_core::{
    CommandsResponse, NotificationTotals, RawCommand, RawStats, StatsResponse, UptimeReport,
};
use garden_error::{FetchError, FetchErrorKind, GardenResult};
use garden_refresh::{Orchestrator, Presenter, Publication, RefreshConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a mock endpoint answers.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Always answer with this body
    Success(T),
    /// Always fail with this error
    Error(FetchErrorKind),
    /// Never answer (sleeps far past any sane timeout)
    Hang,
}

/// Mock bot API that counts calls per endpoint.
pub struct MockBotApi {
    stats: Mutex<MockBehavior<StatsResponse>>,
    commands: Mutex<MockBehavior<CommandsResponse>>,
    stats_calls: AtomicUsize,
    commands_calls: AtomicUsize,
}

impl MockBotApi {
    /// Mock whose endpoints both succeed.
    pub fn new_success(stats: StatsResponse, commands: CommandsResponse) -> Self {
        Self {
            stats: Mutex::new(MockBehavior::Success(stats)),
            commands: Mutex::new(MockBehavior::Success(commands)),
            stats_calls: AtomicUsize::new(0),
            commands_calls: AtomicUsize::new(0),
        }
    }

    /// Mock whose endpoints both fail with `error`.
    pub fn new_error(error: FetchErrorKind) -> Self {
        Self {
            stats: Mutex::new(MockBehavior::Error(error.clone())),
            commands: Mutex::new(MockBehavior::Error(error)),
            stats_calls: AtomicUsize::new(0),
            commands_calls: AtomicUsize::new(0),
        }
    }

    /// Mock whose endpoints never answer.
    pub fn new_hanging() -> Self {
        Self {
            stats: Mutex::new(MockBehavior::Hang),
            commands: Mutex::new(MockBehavior::Hang),
            stats_calls: AtomicUsize::new(0),
            commands_calls: AtomicUsize::new(0),
        }
    }

    /// Change how the stats endpoint answers from now on.
    pub fn set_stats(&self, behavior: MockBehavior<StatsResponse>) {
        *self.stats.lock().unwrap() = behavior;
    }

    /// Change how the commands endpoint answers from now on.
    pub fn set_commands(&self, behavior: MockBehavior<CommandsResponse>) {
        *self.commands.lock().unwrap() = behavior;
    }

    /// Number of stats requests made.
    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    /// Number of commands requests made.
    pub fn commands_calls(&self) -> usize {
        self.commands_calls.load(Ordering::SeqCst)
    }

    /// Requests made to either endpoint.
    pub fn total_calls(&self) -> usize {
        self.stats_calls() + self.commands_calls()
    }

    async fn answer<T: Clone>(behavior: MockBehavior<T>) -> GardenResult<T> {
        match behavior {
            MockBehavior::Success(body) => Ok(body),
            MockBehavior::Error(kind) => Err(FetchError::new(kind).into()),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FetchError::new(FetchErrorKind::Transport("mock hung up".into())).into())
            }
        }
    }
}

#[async_trait]
impl BotApi for MockBotApi {
    async fn fetch_stats(&self) -> GardenResult<StatsResponse> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.stats.lock().unwrap().clone();
        Self::answer(behavior).await
    }

    async fn fetch_commands(&self) -> GardenResult<CommandsResponse> {
        self.commands_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.commands.lock().unwrap().clone();
        Self::answer(behavior).await
    }
}

/// Presenter that keeps every publication.
#[derive(Default)]
pub struct RecordingPresenter {
    published: Mutex<Vec<Publication>>,
}

impl RecordingPresenter {
    /// Everything published so far.
    pub fn published(&self) -> Vec<Publication> {
        self.published.lock().unwrap().clone()
    }

    /// Most recent publication.
    pub fn last(&self) -> Option<Publication> {
        self.published.lock().unwrap().last().cloned()
    }

    /// Forget everything published so far.
    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, publication: Publication) {
        self.published.lock().unwrap().push(publication);
    }
}

/// The stats body used by the happy-path scenarios.
pub fn sample_stats_response() -> StatsResponse {
    StatsResponse {
        stats: RawStats {
            guilds: Some(10),
            total_members: Some(500),
            notifications: Some(NotificationTotals { total: Some(20) }),
            uptime: Some(UptimeReport {
                seconds: Some(3661),
            }),
        },
    }
}

/// A small commands body.
pub fn sample_commands_response() -> CommandsResponse {
    CommandsResponse {
        commands: vec![
            RawCommand {
                name: "config".to_string(),
                description: "Set up notifications".to_string(),
            },
            RawCommand {
                name: "weather".to_string(),
                description: "Current weather".to_string(),
            },
        ],
    }
}

/// Fixed starting instant for every harness.
pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_750_000_000_000).unwrap()
}

/// Orchestrator wired to fakes, with handles to each fake.
pub struct Harness {
    pub orchestrator: Arc<Orchestrator>,
    pub api: Arc<MockBotApi>,
    pub presenter: Arc<RecordingPresenter>,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<CacheStore>,
    pub clock: ManualClock,
}

impl Harness {
    /// Harness with default configuration and an empty store.
    pub fn new(api: MockBotApi) -> Self {
        Self::with_store(api, MemoryStore::new())
    }

    /// Harness over a pre-populated store.
    pub fn with_store(api: MockBotApi, store: MemoryStore) -> Self {
        let clock = ManualClock::new(start_time());
        let store = Arc::new(store);
        let cache = Arc::new(CacheStore::new(store.clone(), Arc::new(clock.clone())));
        let api = Arc::new(api);
        let presenter = Arc::new(RecordingPresenter::default());
        let orchestrator = Arc::new(Orchestrator::new(
            cache.clone(),
            api.clone(),
            presenter.clone(),
            RefreshConfig::default(),
        ));

        Self {
            orchestrator,
            api,
            presenter,
            store,
            cache,
            clock,
        }
    }

    /// Advance the cache clock.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// Minutes as a duration.
pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}
