//! Refresh timing and fallback configuration.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use garden_client::DEFAULT_API_BASE_URL;
use garden_core::{CommandDescriptor, StatsSnapshot, default_commands};
use garden_error::{ConfigError, GardenError, GardenResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Knobs for the refresh orchestrator.
///
/// Every field has a built-in default, so an empty TOML file (or none at all)
/// gives the production behavior: 10 minute validity, 3 minute rate limit,
/// 10 second request timeout, refresh every 5 minutes.
///
/// # Example
///
/// ```toml
/// validity_window_secs = 600
/// rate_limit_window_secs = 180
/// api_base_url = "https://api.gardennotifier.xyz"
///
/// [fallback_stats]
/// servers = 4200
/// users = 600000
/// notifications = 1000000
/// uptime = "1d 0h"
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
#[serde(default)]
pub struct RefreshConfig {
    /// How long a stored payload is trusted (seconds)
    validity_window_secs: u64,

    /// Minimum spacing between network fetches of either resource (seconds)
    rate_limit_window_secs: u64,

    /// Deadline for one API request (seconds)
    request_timeout_secs: u64,

    /// Period of the background refresh (seconds)
    refresh_interval_secs: u64,

    /// How long an error banner stays up (seconds)
    error_banner_secs: u64,

    /// Bot API scheme and host
    #[setters(into)]
    #[builder(setter(into))]
    api_base_url: String,

    /// Stats shown when nothing is cached and the API is down
    fallback_stats: StatsSnapshot,

    /// Commands shown when nothing is cached and the API is down
    fallback_commands: Vec<CommandDescriptor>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: 10 * 60,
            rate_limit_window_secs: 3 * 60,
            request_timeout_secs: 10,
            refresh_interval_secs: 5 * 60,
            error_banner_secs: 15,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fallback_stats: StatsSnapshot::fallback(),
            fallback_commands: default_commands(),
        }
    }
}

impl RefreshConfig {
    /// Load configuration from a TOML file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a window
    /// or timeout is zero.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GardenResult<Self> {
        debug!("Loading refresh configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()
            .map_err(|e| {
                GardenError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GardenError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text. Missing fields keep their defaults.
    pub fn from_toml_str(content: &str) -> GardenResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                GardenError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would disable the cache or the timeout entirely.
    pub fn validate(&self) -> GardenResult<()> {
        let checks = [
            ("validity_window_secs", self.validity_window_secs),
            ("rate_limit_window_secs", self.rate_limit_window_secs),
            ("request_timeout_secs", self.request_timeout_secs),
            ("refresh_interval_secs", self.refresh_interval_secs),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(ConfigError::new(format!("{} must be greater than zero", name)).into());
            }
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::new("api_base_url must not be empty").into());
        }
        Ok(())
    }

    /// Validity window as a duration.
    pub fn validity_window(&self) -> Duration {
        Duration::from_secs(self.validity_window_secs)
    }

    /// Rate-limit window as a duration.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Refresh period as a duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Error banner lifetime as a duration.
    pub fn error_banner_duration(&self) -> Duration {
        Duration::from_secs(self.error_banner_secs)
    }
}
