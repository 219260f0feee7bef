//! Cached resource identifiers.

use serde::{Deserialize, Serialize};

/// Persistent key shared by every resource for the fetch rate limit.
const LAST_FETCH_KEY: &str = "lastAPIFetch";

/// The two independently cached resources.
///
/// Each kind owns a payload key and a timestamp key in the persistent store.
/// The key names match what earlier releases of the page wrote, so existing
/// stores stay readable.
///
/// # Examples
///
/// ```
/// use garden_core::ResourceKind;
///
/// assert_eq!(ResourceKind::Stats.payload_key(), "gardenNotifierStats");
/// assert_eq!(ResourceKind::Commands.to_string(), "commands");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Bot statistics (servers, users, notifications, uptime)
    Stats,
    /// Slash-command list
    Commands,
}

impl ResourceKind {
    /// Key holding the serialized payload.
    pub fn payload_key(&self) -> &'static str {
        match self {
            ResourceKind::Stats => "gardenNotifierStats",
            ResourceKind::Commands => "gardenNotifierCommands",
        }
    }

    /// Key holding the millisecond timestamp of the last successful store.
    pub fn timestamp_key(&self) -> &'static str {
        match self {
            ResourceKind::Stats => "gardenNotifierStatsTimestamp",
            ResourceKind::Commands => "gardenNotifierCommandsTimestamp",
        }
    }

    /// Key of the shared fetch ledger.
    pub fn ledger_key() -> &'static str {
        LAST_FETCH_KEY
    }

    /// Path of this resource on the bot API.
    pub fn api_path(&self) -> &'static str {
        match self {
            ResourceKind::Stats => "/api/stats",
            ResourceKind::Commands => "/api/commands",
        }
    }
}
