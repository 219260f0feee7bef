//! Persistent cache for the two resources shown on the Garden Notifier page.
//!
//! The cache sits on top of a plain string key-value store (the [`KeyValueStore`]
//! trait) and keeps, per resource, a serialized payload and the time it was
//! stored. One extra timestamp, the fetch ledger, is shared by both resources
//! and rate-limits network attempts for them jointly.
//!
//! # Example
//!
//! ```rust
//! use garden_cache::{CacheStore, ManualClock, MemoryStore};
//! use garden_core::{ResourceKind, StatsSnapshot};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = ManualClock::starting_now();
//! let cache = CacheStore::new(Arc::new(MemoryStore::new()), Arc::new(clock.clone()));
//!
//! cache.put(ResourceKind::Stats, &StatsSnapshot::fallback())?;
//! assert!(cache.is_valid(ResourceKind::Stats, Duration::from_secs(600)));
//! assert!(cache.is_rate_limited(Duration::from_secs(180)));
//!
//! clock.advance(Duration::from_secs(180));
//! assert!(!cache.is_rate_limited(Duration::from_secs(180)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod clock;
mod file;
mod info;
mod store;

pub use cache::{CacheStore, CachedResource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use file::FileStore;
pub use info::CacheInfo;
pub use store::{KeyValueStore, MemoryStore};
