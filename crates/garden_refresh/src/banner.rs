//! Transient error banner and "last updated" labels.

use crate::DataSource;
use chrono::{DateTime, TimeZone, Utc};
use garden_cache::CacheInfo;
use std::fmt::Display;
use std::time::Duration;

/// Notice shown while the API is failing, dismissed after a fixed time.
///
/// Only created for error publications. Routine cache hits and rate limiting
/// never produce a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    message: String,
    shown_at: DateTime<Utc>,
    dismiss_at: DateTime<Utc>,
}

impl ErrorBanner {
    /// Build the banner for a publication, or `None` if it carries no error.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use garden_refresh::{DataSource, ErrorBanner};
    /// use std::time::Duration;
    ///
    /// let now = Utc::now();
    /// let banner = ErrorBanner::for_source(DataSource::Fallback, None, now, Duration::from_secs(15))
    ///     .unwrap();
    /// assert_eq!(
    ///     banner.message(),
    ///     "API temporarily unavailable - showing fallback data (cached)"
    /// );
    /// assert!(ErrorBanner::for_source(DataSource::Cache, None, now, Duration::from_secs(15)).is_none());
    /// ```
    pub fn for_source(
        source: DataSource,
        info: Option<&CacheInfo>,
        shown_at: DateTime<Utc>,
        dismiss_after: Duration,
    ) -> Option<Self> {
        if !source.has_error() {
            return None;
        }

        let shown = if source.is_from_cache() {
            "cached"
        } else {
            "fallback"
        };
        let age = info
            .map(|i| format!("{}m ago", i.age_minutes))
            .unwrap_or_else(|| "cached".to_string());
        let lifetime = chrono::TimeDelta::from_std(dismiss_after).unwrap_or(chrono::TimeDelta::MAX);

        Some(Self {
            message: format!(
                "API temporarily unavailable - showing {} data ({})",
                shown, age
            ),
            shown_at,
            dismiss_at: shown_at.checked_add_signed(lifetime).unwrap_or(shown_at),
        })
    }

    /// Banner text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the banner appeared.
    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }

    /// When the banner disappears.
    pub fn dismiss_at(&self) -> DateTime<Utc> {
        self.dismiss_at
    }

    /// Whether the banner is still up at `now`.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now >= self.shown_at && now < self.dismiss_at
    }
}

/// "Last updated" label for a resource, in the viewer's time zone.
///
/// Fresh and fallback data are labelled with the current time and `(live)`.
/// Cached data is labelled with the last fetch time, or the resource's own
/// stored time if the ledger is missing, and `(cached)`.
pub fn timestamp_label<Tz>(source: DataSource, info: Option<&CacheInfo>, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !source.is_from_cache() {
        return format!("{} (live)", clock_time(&now));
    }

    match info {
        Some(info) => {
            let at = info.last_fetch_at.unwrap_or(info.stored_at);
            format!("{} (cached)", clock_time(&at.with_timezone(&now.timezone())))
        }
        None => "cached data".to_string(),
    }
}

fn clock_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::ResourceKind;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
    }

    fn info(stored_at: DateTime<Utc>, last_fetch_at: Option<DateTime<Utc>>, age: i64) -> CacheInfo {
        CacheInfo {
            kind: ResourceKind::Stats,
            stored_at,
            age_minutes: age,
            last_fetch_at,
            last_fetch_minutes: None,
            is_valid: false,
            is_rate_limited: false,
            expires_at: stored_at,
            next_fetch_allowed_at: stored_at,
            expires_in_minutes: 0,
            next_fetch_in_minutes: 0,
        }
    }

    #[test]
    fn test_stale_banner_mentions_age() {
        let cache_info = info(at(9, 0), None, 42);
        let banner = ErrorBanner::for_source(
            DataSource::StaleOnError,
            Some(&cache_info),
            at(9, 42),
            Duration::from_secs(15),
        )
        .unwrap();

        assert_eq!(
            banner.message(),
            "API temporarily unavailable - showing cached data (42m ago)"
        );
    }

    #[test]
    fn test_banner_auto_dismisses() {
        let shown = at(12, 0);
        let banner =
            ErrorBanner::for_source(DataSource::Fallback, None, shown, Duration::from_secs(15))
                .unwrap();

        assert!(banner.is_visible(shown));
        assert!(banner.is_visible(shown + chrono::TimeDelta::seconds(14)));
        assert!(!banner.is_visible(shown + chrono::TimeDelta::seconds(15)));
        assert_eq!(banner.dismiss_at(), shown + chrono::TimeDelta::seconds(15));
    }

    #[test]
    fn test_no_banner_without_error() {
        for source in [DataSource::Fresh, DataSource::Cache] {
            assert!(
                ErrorBanner::for_source(source, None, at(1, 0), Duration::from_secs(15)).is_none()
            );
        }
    }

    #[test]
    fn test_live_label_uses_now() {
        assert_eq!(
            timestamp_label(DataSource::Fresh, None, at(15, 4)),
            "3:04 PM (live)"
        );
        assert_eq!(
            timestamp_label(DataSource::Fallback, None, at(0, 30)),
            "12:30 AM (live)"
        );
    }

    #[test]
    fn test_cached_label_prefers_last_fetch() {
        let with_ledger = info(at(8, 0), Some(at(8, 55)), 60);
        let without_ledger = info(at(8, 0), None, 60);

        assert_eq!(
            timestamp_label(DataSource::Cache, Some(&with_ledger), at(9, 0)),
            "8:55 AM (cached)"
        );
        assert_eq!(
            timestamp_label(DataSource::StaleOnError, Some(&without_ledger), at(9, 0)),
            "8:00 AM (cached)"
        );
        assert_eq!(
            timestamp_label(DataSource::Cache, None, at(9, 0)),
            "cached data"
        );
    }
}
