//! Top-level error wrapper types.

use crate::{CacheError, ConfigError, FetchError, JsonError, StorageError};

/// Every failure the refresher can produce.
///
/// # Examples
///
/// ```
/// use garden_error::{GardenError, FetchError, FetchErrorKind};
///
/// let fetch_err = FetchError::new(FetchErrorKind::Transport("connection refused".into()));
/// let err: GardenError = fetch_err.into();
/// assert!(format!("{}", err).contains("Fetch Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GardenErrorKind {
    /// Remote API failure
    #[from(FetchError)]
    Fetch(FetchError),
    /// Cache serialization or store failure
    #[from(CacheError)]
    Cache(CacheError),
    /// Persistent store file failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Garden Notifier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use garden_error::{ConfigError, GardenResult};
///
/// fn might_fail() -> GardenResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Garden Notifier Error: {}", _0)]
pub struct GardenError(Box<GardenErrorKind>);

impl GardenError {
    /// Create a new error from a kind.
    pub fn new(kind: GardenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GardenErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GardenErrorKind
impl<T> From<T> for GardenError
where
    T: Into<GardenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Garden Notifier operations.
pub type GardenResult<T> = std::result::Result<T, GardenError>;
