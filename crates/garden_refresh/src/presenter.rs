//! Presentation seam: what the orchestrator hands to whoever renders the page.

use garden_core::{CommandDescriptor, ResourceKind, StatsSnapshot};

/// Where a published payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    /// Just fetched from the API
    Fresh,
    /// Served from cache; either still valid or held back by the rate limit
    Cache,
    /// Served from cache because the fetch failed
    StaleOnError,
    /// Built-in fallback because the fetch failed and nothing was cached
    Fallback,
}

impl DataSource {
    /// Whether the payload was read from the cache.
    pub fn is_from_cache(&self) -> bool {
        matches!(self, DataSource::Cache | DataSource::StaleOnError)
    }

    /// Whether a fetch failed on the way to this payload.
    pub fn has_error(&self) -> bool {
        matches!(self, DataSource::StaleOnError | DataSource::Fallback)
    }
}

/// A payload ready to render, tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate<T> {
    payload: T,
    source: DataSource,
}

impl<T> DisplayUpdate<T> {
    /// Tag `payload` with `source`.
    pub fn new(payload: T, source: DataSource) -> Self {
        Self { payload, source }
    }

    /// The data to render.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Where the data came from.
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// See [`DataSource::is_from_cache`].
    pub fn is_from_cache(&self) -> bool {
        self.source.is_from_cache()
    }

    /// See [`DataSource::has_error`].
    pub fn has_error(&self) -> bool {
        self.source.has_error()
    }

    /// The `(payload, is_from_cache, has_error)` triple renderers work from.
    pub fn as_tuple(&self) -> (&T, bool, bool) {
        (&self.payload, self.is_from_cache(), self.has_error())
    }

    /// Take ownership of the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// One publication per resource refresh step.
#[derive(Debug, Clone, PartialEq)]
pub enum Publication {
    /// Bot statistics
    Stats(DisplayUpdate<StatsSnapshot>),
    /// Command list
    Commands(DisplayUpdate<Vec<CommandDescriptor>>),
}

impl Publication {
    /// Resource this publication is for.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Publication::Stats(_) => ResourceKind::Stats,
            Publication::Commands(_) => ResourceKind::Commands,
        }
    }

    /// Where the published data came from.
    pub fn source(&self) -> DataSource {
        match self {
            Publication::Stats(update) => update.source(),
            Publication::Commands(update) => update.source(),
        }
    }

    /// Whether the published data was read from the cache.
    pub fn is_from_cache(&self) -> bool {
        self.source().is_from_cache()
    }

    /// Whether a fetch failed on the way to this publication.
    pub fn has_error(&self) -> bool {
        self.source().has_error()
    }
}

/// Receives data whenever there is something to show.
///
/// Implementations render however they like; the orchestrator only promises
/// to call [`present`](Presenter::present) with the best data it has. The same
/// payload may be presented more than once in a single refresh.
pub trait Presenter: Send + Sync {
    /// Render a publication.
    fn present(&self, publication: Publication);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_flags() {
        let cases = [
            (DataSource::Fresh, false, false),
            (DataSource::Cache, true, false),
            (DataSource::StaleOnError, true, true),
            (DataSource::Fallback, false, true),
        ];
        for (source, from_cache, has_error) in cases {
            assert_eq!(source.is_from_cache(), from_cache, "{}", source);
            assert_eq!(source.has_error(), has_error, "{}", source);
        }
    }

    #[test]
    fn test_publication_accessors() {
        let publication = Publication::Stats(DisplayUpdate::new(
            StatsSnapshot::fallback(),
            DataSource::Fallback,
        ));

        assert_eq!(publication.kind(), ResourceKind::Stats);
        assert!(!publication.is_from_cache());
        assert!(publication.has_error());
    }

    #[test]
    fn test_as_tuple() {
        let update = DisplayUpdate::new(vec![1, 2, 3], DataSource::StaleOnError);
        let (payload, from_cache, has_error) = update.as_tuple();
        assert_eq!(payload, &vec![1, 2, 3]);
        assert!(from_cache);
        assert!(has_error);
    }
}
