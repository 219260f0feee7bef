//! Stats/commands cache over a key-value store.

use crate::info::{ceil_minutes_remaining, floor_minutes};
use crate::{CacheInfo, Clock, KeyValueStore};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use garden_core::ResourceKind;
use garden_error::{CacheError, CacheErrorKind, GardenResult};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// A payload read back from the cache.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct CachedResource<T> {
    kind: ResourceKind,
    payload: T,
    stored_at: Option<DateTime<Utc>>,
}

impl<T> CachedResource<T> {
    /// Take ownership of the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Cache for the stats and commands resources.
///
/// Every successful [`put`](Self::put) writes three keys: the payload, its
/// timestamp, and the shared fetch ledger. Because the ledger is shared, storing
/// one resource rate-limits network attempts for both.
///
/// Reads never fail: a missing or unparseable value is a cache miss, logged and
/// otherwise ignored.
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl CacheStore {
    /// Create a cache over `store`, reading time from `clock`.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!("Creating new CacheStore");
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Read the cached payload for `kind`.
    ///
    /// Returns `None` when nothing is stored or the stored text does not parse
    /// as `T`. A payload whose timestamp is missing or unreadable is returned
    /// with `stored_at` of `None`.
    pub fn get<T: DeserializeOwned>(&self, kind: ResourceKind) -> Option<CachedResource<T>> {
        let raw = self.read(kind.payload_key())?;

        let payload = match serde_json::from_str(&raw) {
            Ok(payload) => payload,
            Err(e) => {
                let err = CacheError::new(CacheErrorKind::Deserialize {
                    resource: kind.to_string(),
                    message: e.to_string(),
                });
                tracing::warn!(%kind, error = %err, "Discarding unreadable cache entry");
                return None;
            }
        };

        Some(CachedResource {
            kind,
            payload,
            stored_at: self.read_timestamp(kind.timestamp_key()),
        })
    }

    /// Store a fresh payload for `kind` and stamp the shared fetch ledger.
    ///
    /// The ledger never moves backwards: if the clock reads earlier than the
    /// recorded last fetch, the recorded value is kept.
    #[tracing::instrument(skip(self, payload))]
    pub fn put<T: Serialize>(&self, kind: ResourceKind, payload: &T) -> GardenResult<()> {
        let serialized = serde_json::to_string(payload).map_err(|e| {
            CacheError::new(CacheErrorKind::Serialize {
                resource: kind.to_string(),
                message: e.to_string(),
            })
        })?;

        let _guard = self.write_lock.lock();
        let now_ms = self.now().timestamp_millis();

        self.write(kind.payload_key(), &serialized)?;
        self.write(kind.timestamp_key(), &now_ms.to_string())?;

        let ledger_ms = match self.read_millis(ResourceKind::ledger_key()) {
            Some(previous) if previous > now_ms => {
                tracing::debug!(previous, now_ms, "Clock behind fetch ledger, keeping ledger");
                previous
            }
            _ => now_ms,
        };
        self.write(ResourceKind::ledger_key(), &ledger_ms.to_string())?;

        tracing::debug!(bytes = serialized.len(), "Cached resource");
        Ok(())
    }

    /// Whether the payload for `kind` was stored less than `window` ago.
    ///
    /// False when no timestamp exists. At exactly `window` the entry is no
    /// longer valid.
    pub fn is_valid(&self, kind: ResourceKind, window: Duration) -> bool {
        self.read_millis(kind.timestamp_key())
            .is_some_and(|stored| self.elapsed_ms(stored) < window_ms(window))
    }

    /// Whether either resource was fetched less than `window` ago.
    pub fn is_rate_limited(&self, window: Duration) -> bool {
        self.read_millis(ResourceKind::ledger_key())
            .is_some_and(|last| self.elapsed_ms(last) < window_ms(window))
    }

    /// Time of the last successful fetch of either resource.
    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.read_timestamp(ResourceKind::ledger_key())
    }

    /// Time the payload for `kind` was stored.
    pub fn stored_at(&self, kind: ResourceKind) -> Option<DateTime<Utc>> {
        self.read_timestamp(kind.timestamp_key())
    }

    /// Diagnostic snapshot for `kind`, or `None` if it has never been stored.
    pub fn describe(
        &self,
        kind: ResourceKind,
        validity: Duration,
        rate_limit: Duration,
    ) -> Option<CacheInfo> {
        let stored_ms = self.read_millis(kind.timestamp_key())?;
        let stored_at = DateTime::from_timestamp_millis(stored_ms)?;
        let last_fetch_ms = self.read_millis(ResourceKind::ledger_key());

        let now = self.now();
        let now_ms = now.timestamp_millis();
        let expires_ms = stored_ms.saturating_add(window_ms(validity));
        let next_fetch_ms = last_fetch_ms
            .map(|last| last.saturating_add(window_ms(rate_limit)))
            .unwrap_or(now_ms);

        Some(CacheInfo {
            kind,
            stored_at,
            age_minutes: floor_minutes(now_ms.saturating_sub(stored_ms)),
            last_fetch_at: last_fetch_ms.and_then(DateTime::from_timestamp_millis),
            last_fetch_minutes: last_fetch_ms
                .map(|last| floor_minutes(now_ms.saturating_sub(last))),
            is_valid: self.is_valid(kind, validity),
            is_rate_limited: self.is_rate_limited(rate_limit),
            expires_at: DateTime::from_timestamp_millis(expires_ms).unwrap_or(stored_at),
            next_fetch_allowed_at: DateTime::from_timestamp_millis(next_fetch_ms).unwrap_or(now),
            expires_in_minutes: ceil_minutes_remaining(expires_ms.saturating_sub(now_ms)),
            next_fetch_in_minutes: ceil_minutes_remaining(next_fetch_ms.saturating_sub(now_ms)),
        })
    }

    fn elapsed_ms(&self, since_ms: i64) -> i64 {
        self.now().timestamp_millis().saturating_sub(since_ms)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Key-value store read failed, treating as miss");
                None
            }
        }
    }

    fn read_millis(&self, key: &str) -> Option<i64> {
        let raw = self.read(key)?;
        match raw.trim().parse::<i64>() {
            Ok(ms) if DateTime::from_timestamp_millis(ms).is_some() => Some(ms),
            Ok(ms) => {
                tracing::warn!(key, ms, "Ignoring out-of-range timestamp");
                None
            }
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "Ignoring unreadable timestamp");
                None
            }
        }
    }

    fn read_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.read_millis(key)
            .and_then(DateTime::from_timestamp_millis)
    }

    fn write(&self, key: &str, value: &str) -> GardenResult<()> {
        self.store.set_item(key, value).map_err(|e| {
            tracing::error!(key, error = %e, "Failed to write cache entry");
            CacheError::new(CacheErrorKind::Store {
                key: key.to_string(),
                message: e.to_string(),
            })
            .into()
        })
    }
}

fn window_ms(window: Duration) -> i64 {
    i64::try_from(window.as_millis()).unwrap_or(i64::MAX)
}
