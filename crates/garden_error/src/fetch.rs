//! Remote API fetch error types.

/// Kinds of failures when loading a resource from the bot API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The API answered with a non-2xx status.
    #[display("HTTP error status {}", status)]
    Status {
        /// HTTP status code returned by the API
        status: u16,
    },
    /// No response arrived before the deadline.
    #[display("Request timed out after {}ms", after_ms)]
    Timeout {
        /// Deadline that elapsed, in milliseconds
        after_ms: u64,
    },
    /// The response body was not the JSON shape we expect.
    #[display("Malformed response body: {}", _0)]
    MalformedBody(String),
}

/// Fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use garden_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Timeout { after_ms: 10_000 });
/// assert!(format!("{}", err).contains("timed out"));
/// assert!(err.is_timeout());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of error that occurred
    pub kind: FetchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the request was abandoned because its deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Timeout { .. })
    }
}
