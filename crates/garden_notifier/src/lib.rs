//! Garden Notifier site refresher.
//!
//! Keeps the bot statistics and slash-command list shown on the Garden
//! Notifier site current without hammering the bot API. Data is served from a
//! persistent cache while it is valid, refetched at most once per rate-limit
//! window across both resources, and replaced by a built-in fallback when the
//! API is down and nothing is cached.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use garden_notifier::{
//!     ApiClient, CacheStore, FileStore, Orchestrator, RefreshConfig, SystemClock,
//!     TerminalPresenter,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RefreshConfig::default();
//!     let store = FileStore::open("cache.json")?;
//!     let cache = Arc::new(CacheStore::new(Arc::new(store), Arc::new(SystemClock)));
//!     let api = ApiClient::new(config.api_base_url(), config.request_timeout())?;
//!     let presenter = TerminalPresenter::stdout(cache.clone(), config.clone());
//!
//!     let orchestrator = Orchestrator::new(cache, Arc::new(api), Arc::new(presenter), config);
//!     orchestrator.refresh_all(false).await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `garden_error` - Error types
//! - `garden_core` - Stats and command models, formatting
//! - `garden_cache` - Key-value cache with validity and rate-limit ledger
//! - `garden_client` - HTTP client for the bot API
//! - `garden_refresh` - Refresh orchestration, presentation seam, scheduling
//!
//! This crate (`garden_notifier`) re-exports everything for convenience and
//! hosts the `garden-notifier` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;
mod presenter;

pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
pub use presenter::{TerminalPresenter, render_commands, render_stats};

// Error types
pub use garden_error::{
    CacheError, CacheErrorKind, ConfigError, FetchError, FetchErrorKind, GardenError,
    GardenErrorKind, GardenResult, JsonError, StorageError, StorageErrorKind,
};

// Core models
pub use garden_core::{
    CommandCategory, CommandDescriptor, CommandsResponse, RawCommand, RawStats, ResourceKind,
    StatsResponse, StatsSnapshot, default_commands, format_number, format_uptime,
};

// Cache
pub use garden_cache::{
    CacheInfo, CacheStore, CachedResource, Clock, FileStore, KeyValueStore, ManualClock,
    MemoryStore, SystemClock,
};

// API client
pub use garden_client::{ApiClient, BotApi, DEFAULT_API_BASE_URL};

// Refresh
pub use garden_refresh::{
    DataSource, DisplayUpdate, ErrorBanner, Orchestrator, Presenter, Publication,
    RefreshConfig, RefreshConfigBuilder, RefreshMessage, RefreshOutcome, RefreshScheduler,
    RefreshWorker, timestamp_label,
};

/// Default location of the persistent cache file.
///
/// `<data dir>/garden_notifier/cache.json`, or `None` when the platform has no
/// data directory.
pub fn default_state_path() -> Option<std::path::PathBuf> {
    dirs::data_dir().map(|dir| dir.join("garden_notifier").join("cache.json"))
}
