//! reqwest-backed client for the bot API.

use garden_core::{CommandsResponse, ResourceKind, StatsResponse};
use garden_error::{FetchError, FetchErrorKind, GardenResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Public API host used by the live site.
pub const DEFAULT_API_BASE_URL: &str = "https://api.gardennotifier.xyz";

/// Source of raw bot data.
#[async_trait::async_trait]
pub trait BotApi: Send + Sync {
    /// Fetch `GET /api/stats`.
    async fn fetch_stats(&self) -> GardenResult<StatsResponse>;

    /// Fetch `GET /api/commands`.
    async fn fetch_commands(&self) -> GardenResult<CommandsResponse>;
}

/// HTTP client for the bot API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host, e.g. `https://api.gardennotifier.xyz`
    /// * `timeout` - Deadline for the whole request, including the body
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GardenResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Creating new API client");

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("garden-notifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::new(FetchErrorKind::Transport(format!(
                "Failed to build HTTP client: {}",
                e
            ))))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a resource.
    pub fn url_for(&self, kind: ResourceKind) -> String {
        format!("{}{}", self.base_url, kind.api_path())
    }

    #[instrument(skip(self), fields(url = %self.url_for(kind)))]
    async fn get_json<T: DeserializeOwned>(&self, kind: ResourceKind) -> GardenResult<T> {
        debug!("Sending request to bot API");

        let response = self
            .client
            .get(self.url_for(kind))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Bot API returned error status");
            return Err(FetchError::new(FetchErrorKind::Status {
                status: status.as_u16(),
            })
            .into());
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse bot API response");
            FetchError::new(FetchErrorKind::MalformedBody(e.to_string())).into()
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            error!(timeout_ms = self.timeout.as_millis() as u64, "Bot API request timed out");
            FetchError::new(FetchErrorKind::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            })
        } else {
            error!(error = ?e, "Bot API request failed");
            FetchError::new(FetchErrorKind::Transport(e.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl BotApi for ApiClient {
    async fn fetch_stats(&self) -> GardenResult<StatsResponse> {
        self.get_json(ResourceKind::Stats).await
    }

    async fn fetch_commands(&self) -> GardenResult<CommandsResponse> {
        self.get_json(ResourceKind::Commands).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() -> anyhow::Result<()> {
        let client = ApiClient::new("https://example.test/", Duration::from_secs(10))?;

        assert_eq!(client.base_url(), "https://example.test");
        assert_eq!(
            client.url_for(ResourceKind::Stats),
            "https://example.test/api/stats"
        );
        assert_eq!(
            client.url_for(ResourceKind::Commands),
            "https://example.test/api/commands"
        );
        Ok(())
    }
}
