//! Read-only cache diagnostics.

use chrono::{DateTime, Utc};
use garden_core::ResourceKind;
use serde::Serialize;

const MINUTE_MS: i64 = 60_000;

/// Snapshot of one resource's cache state.
///
/// Only used for status logging and "cached at" labels. Refresh decisions call
/// [`CacheStore::is_valid`](crate::CacheStore::is_valid) and
/// [`CacheStore::is_rate_limited`](crate::CacheStore::is_rate_limited) directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Resource described
    pub kind: ResourceKind,
    /// When the payload was stored
    pub stored_at: DateTime<Utc>,
    /// Whole minutes since the payload was stored
    pub age_minutes: i64,
    /// Last successful fetch of either resource
    pub last_fetch_at: Option<DateTime<Utc>>,
    /// Whole minutes since the last successful fetch of either resource
    pub last_fetch_minutes: Option<i64>,
    /// Whether the payload is inside its validity window
    pub is_valid: bool,
    /// Whether the shared fetch ledger currently blocks network attempts
    pub is_rate_limited: bool,
    /// When the payload leaves its validity window
    pub expires_at: DateTime<Utc>,
    /// When the next network attempt is allowed
    pub next_fetch_allowed_at: DateTime<Utc>,
    /// Minutes until expiry, rounded up, never negative
    pub expires_in_minutes: i64,
    /// Minutes until the next allowed fetch, rounded up, never negative
    pub next_fetch_in_minutes: i64,
}

/// Whole minutes elapsed, rounded down.
pub(crate) fn floor_minutes(elapsed_ms: i64) -> i64 {
    elapsed_ms.div_euclid(MINUTE_MS)
}

/// Minutes remaining, rounded up and clamped at zero.
pub(crate) fn ceil_minutes_remaining(remaining_ms: i64) -> i64 {
    if remaining_ms <= 0 {
        0
    } else {
        remaining_ms.saturating_add(MINUTE_MS - 1) / MINUTE_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_minutes() {
        assert_eq!(floor_minutes(0), 0);
        assert_eq!(floor_minutes(59_999), 0);
        assert_eq!(floor_minutes(60_000), 1);
        assert_eq!(floor_minutes(-1), -1);
    }

    #[test]
    fn test_ceil_minutes_remaining() {
        assert_eq!(ceil_minutes_remaining(-5_000), 0);
        assert_eq!(ceil_minutes_remaining(0), 0);
        assert_eq!(ceil_minutes_remaining(1), 1);
        assert_eq!(ceil_minutes_remaining(60_000), 1);
        assert_eq!(ceil_minutes_remaining(60_001), 2);
        assert_eq!(ceil_minutes_remaining(i64::MAX), i64::MAX / MINUTE_MS);
    }
}
