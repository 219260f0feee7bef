//! Bot statistics: the raw API shape and the cached display snapshot.

use crate::format_uptime;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Statistics block
    pub stats: RawStats,
}

/// Statistics as reported by the bot. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    /// Number of guilds the bot is in
    #[serde(default)]
    pub guilds: Option<u64>,
    /// Members across all guilds
    #[serde(default)]
    pub total_members: Option<u64>,
    /// Notification counters
    #[serde(default)]
    pub notifications: Option<NotificationTotals>,
    /// Process uptime
    #[serde(default)]
    pub uptime: Option<UptimeReport>,
}

/// Notification counters in the stats response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationTotals {
    /// Notifications sent since launch
    #[serde(default)]
    pub total: Option<u64>,
}

/// Uptime block in the stats response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UptimeReport {
    /// Uptime in whole seconds
    #[serde(default)]
    pub seconds: Option<u64>,
}

/// Statistics ready for display and caching.
///
/// Uptime is kept as its rendered string, never as raw seconds.
///
/// # Examples
///
/// ```
/// use garden_core::{RawStats, StatsResponse, StatsSnapshot, UptimeReport};
///
/// let response = StatsResponse {
///     stats: RawStats {
///         guilds: Some(10),
///         total_members: Some(500),
///         notifications: None,
///         uptime: Some(UptimeReport { seconds: Some(3661) }),
///     },
/// };
/// let snapshot = StatsSnapshot::from(response);
/// assert_eq!(snapshot.servers, 10);
/// assert_eq!(snapshot.notifications, 0);
/// assert_eq!(snapshot.uptime, "1h 1m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Servers (guilds) using the bot
    pub servers: u64,
    /// Users across those servers
    pub users: u64,
    /// Notifications delivered
    pub notifications: u64,
    /// Formatted uptime, e.g. `"1d 1h"`
    pub uptime: String,
}

impl StatsSnapshot {
    /// Snapshot shown when the API is unreachable and nothing is cached.
    pub fn fallback() -> Self {
        Self {
            servers: 4200,
            users: 600_000,
            notifications: 1_000_000,
            uptime: format_uptime(86_400),
        }
    }
}

impl From<StatsResponse> for StatsSnapshot {
    fn from(response: StatsResponse) -> Self {
        let stats = response.stats;
        Self {
            servers: stats.guilds.unwrap_or(0),
            users: stats.total_members.unwrap_or(0),
            notifications: stats
                .notifications
                .and_then(|n| n.total)
                .unwrap_or(0),
            uptime: stats
                .uptime
                .map(|u| format_uptime(u.seconds.unwrap_or(0)))
                .unwrap_or_else(|| "0s".to_string()),
        }
    }
}
