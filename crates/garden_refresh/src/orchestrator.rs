//! Cache-first refresh decisions for each resource.

use crate::{DataSource, DisplayUpdate, Presenter, Publication, RefreshConfig};
use garden_cache::{CacheStore, CachedResource};
use garden_client::BotApi;
use garden_core::{CommandDescriptor, ResourceKind, StatsSnapshot};
use garden_error::{FetchError, FetchErrorKind, GardenResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// What a single refresh ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshOutcome {
    /// Fetched, cached, and published fresh data
    Fresh,
    /// Cache was still valid; published it without touching the network
    CacheCurrent,
    /// Wanted to fetch but the shared rate limit was in effect
    RateLimited {
        /// Whether cached data was available to publish
        served_cache: bool,
    },
    /// Fetch failed; republished cached data with the error flag
    StaleOnError,
    /// Fetch failed with nothing cached; published the fallback with the error flag
    FallbackOnError,
}

impl RefreshOutcome {
    /// Whether this refresh sent a request to the API.
    pub fn hit_network(&self) -> bool {
        matches!(
            self,
            RefreshOutcome::Fresh | RefreshOutcome::StaleOnError | RefreshOutcome::FallbackOnError
        )
    }
}

/// Decides, per resource, between cached, fresh, and fallback data.
///
/// Stats and commands share one rate-limit ledger: a successful fetch of
/// either blocks network attempts for both until the window passes.
pub struct Orchestrator {
    cache: Arc<CacheStore>,
    api: Arc<dyn BotApi>,
    presenter: Arc<dyn Presenter>,
    config: RefreshConfig,
}

impl Orchestrator {
    /// Creates an orchestrator over an explicit cache, API and presenter.
    pub fn new(
        cache: Arc<CacheStore>,
        api: Arc<dyn BotApi>,
        presenter: Arc<dyn Presenter>,
        config: RefreshConfig,
    ) -> Self {
        debug!(
            validity_secs = config.validity_window_secs(),
            rate_limit_secs = config.rate_limit_window_secs(),
            timeout_secs = config.request_timeout_secs(),
            "Creating new Orchestrator"
        );
        Self {
            cache,
            api,
            presenter,
            config,
        }
    }

    /// The cache this orchestrator reads and writes.
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Active configuration.
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Refresh bot statistics.
    ///
    /// With `force_refresh` the cache is neither shown up front nor trusted,
    /// but the rate limit still applies.
    #[instrument(skip(self))]
    pub async fn refresh_stats(&self, force_refresh: bool) -> RefreshOutcome {
        let api = Arc::clone(&self.api);
        self.refresh(
            ResourceKind::Stats,
            force_refresh,
            || async move { api.fetch_stats().await.map(StatsSnapshot::from) },
            || self.config.fallback_stats().clone(),
            Publication::Stats,
        )
        .await
    }

    /// Refresh the command list.
    #[instrument(skip(self))]
    pub async fn refresh_commands(&self, force_refresh: bool) -> RefreshOutcome {
        let api = Arc::clone(&self.api);
        self.refresh(
            ResourceKind::Commands,
            force_refresh,
            || async move {
                api.fetch_commands()
                    .await
                    .map(Vec::<CommandDescriptor>::from)
            },
            || self.config.fallback_commands().clone(),
            Publication::Commands,
        )
        .await
    }

    /// Refresh both resources concurrently.
    ///
    /// The two refreshes are not ordered. Whichever stores first may make the
    /// other see the shared rate limit and serve cache for this round.
    pub async fn refresh_all(&self, force_refresh: bool) -> (RefreshOutcome, RefreshOutcome) {
        tokio::join!(
            self.refresh_stats(force_refresh),
            self.refresh_commands(force_refresh)
        )
    }

    async fn refresh<T, F, Fut>(
        &self,
        kind: ResourceKind,
        force_refresh: bool,
        fetch: F,
        fallback: impl FnOnce() -> T,
        publish: fn(DisplayUpdate<T>) -> Publication,
    ) -> RefreshOutcome
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = GardenResult<T>>,
    {
        self.log_cache_status(kind);

        let cached = self.cache.get::<T>(kind).map(CachedResource::into_payload);

        // Show whatever we have before touching the network.
        if let Some(payload) = cached.as_ref().filter(|_| !force_refresh) {
            debug!(%kind, "Publishing cached data");
            self.publish(publish, payload.clone(), DataSource::Cache);
        }

        let should_fetch = force_refresh
            || cached.is_none()
            || !self.cache.is_valid(kind, self.config.validity_window());
        let rate_limited = self.cache.is_rate_limited(self.config.rate_limit_window());

        debug!(%kind, should_fetch, rate_limited, "Refresh decision");

        if !should_fetch {
            return RefreshOutcome::CacheCurrent;
        }

        if rate_limited {
            let next_fetch_in = self
                .cache
                .describe(
                    kind,
                    self.config.validity_window(),
                    self.config.rate_limit_window(),
                )
                .map(|i| i.next_fetch_in_minutes)
                .unwrap_or(0);
            info!(%kind, next_fetch_in_minutes = next_fetch_in, "Rate limited, using cached data");

            return match cached {
                Some(payload) => {
                    self.publish(publish, payload, DataSource::Cache);
                    RefreshOutcome::RateLimited { served_cache: true }
                }
                None => RefreshOutcome::RateLimited {
                    served_cache: false,
                },
            };
        }

        info!(%kind, "Fetching fresh data");
        match self.fetch_with_deadline(fetch).await {
            Ok(fresh) => {
                if let Err(e) = self.cache.put(kind, &fresh) {
                    warn!(%kind, error = %e, "Fetched data could not be cached");
                }
                info!(%kind, "Fresh data loaded and cached");
                self.publish(publish, fresh, DataSource::Fresh);
                RefreshOutcome::Fresh
            }
            Err(e) => {
                error!(%kind, error = %e, "Failed to load fresh data");
                match cached {
                    Some(payload) => {
                        warn!(%kind, "Using cached data due to API error");
                        self.publish(publish, payload, DataSource::StaleOnError);
                        RefreshOutcome::StaleOnError
                    }
                    None => {
                        warn!(%kind, "Using fallback data (no cache available)");
                        self.publish(publish, fallback(), DataSource::Fallback);
                        RefreshOutcome::FallbackOnError
                    }
                }
            }
        }
    }

    async fn fetch_with_deadline<T, F, Fut>(&self, fetch: F) -> GardenResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GardenResult<T>>,
    {
        let deadline = self.config.request_timeout();
        match tokio::time::timeout(deadline, fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::new(FetchErrorKind::Timeout {
                after_ms: deadline.as_millis() as u64,
            })
            .into()),
        }
    }

    fn publish<T>(
        &self,
        publish: fn(DisplayUpdate<T>) -> Publication,
        payload: T,
        source: DataSource,
    ) {
        self.presenter
            .present(publish(DisplayUpdate::new(payload, source)));
    }

    fn log_cache_status(&self, kind: ResourceKind) {
        match self.cache.describe(
            kind,
            self.config.validity_window(),
            self.config.rate_limit_window(),
        ) {
            Some(info) => debug!(
                %kind,
                age_minutes = info.age_minutes,
                expires_in_minutes = info.expires_in_minutes,
                expires_at = %info.expires_at,
                next_fetch_in_minutes = info.next_fetch_in_minutes,
                next_fetch_allowed_at = %info.next_fetch_allowed_at,
                is_valid = info.is_valid,
                is_rate_limited = info.is_rate_limited,
                "Cache status"
            ),
            None => debug!(%kind, "No cache found - will fetch fresh data"),
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
