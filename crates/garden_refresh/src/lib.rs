//! Cache-first refresh of the stats and commands shown on the Garden Notifier page.
//!
//! The [`Orchestrator`] decides, per resource, whether to show cached data,
//! whether the network may be hit (cache validity plus a rate limit shared by
//! both resources), and how to fall back when a fetch fails. Whatever it
//! decides, the [`Presenter`] always receives the best data available: fresh,
//! then cached, then a built-in fallback. Errors are logged and never surface.
//!
//! [`RefreshWorker`] and [`RefreshScheduler`] drive the orchestrator on a
//! fixed interval, the way the page refreshes itself every five minutes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod banner;
mod config;
mod orchestrator;
mod presenter;
mod worker;

pub use banner::{ErrorBanner, timestamp_label};
pub use config::{RefreshConfig, RefreshConfigBuilder};
pub use orchestrator::{Orchestrator, RefreshOutcome};
pub use presenter::{DataSource, DisplayUpdate, Presenter, Publication};
pub use worker::{RefreshMessage, RefreshScheduler, RefreshWorker};
