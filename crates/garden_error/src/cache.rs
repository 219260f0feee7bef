//! Cache store error types.

/// Kinds of cache errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CacheErrorKind {
    /// Payload could not be serialized before storing
    #[display("Failed to serialize {} payload: {}", resource, message)]
    Serialize {
        /// Resource whose payload failed
        resource: String,
        /// Serializer message
        message: String,
    },
    /// Stored payload could not be parsed back
    #[display("Failed to parse cached {}: {}", resource, message)]
    Deserialize {
        /// Resource whose payload failed
        resource: String,
        /// Parser message
        message: String,
    },
    /// Underlying key-value store rejected the operation
    #[display("Key-value store failure for '{}': {}", key, message)]
    Store {
        /// Key being read or written
        key: String,
        /// Store message
        message: String,
    },
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use garden_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::Deserialize {
///     resource: "stats".to_string(),
///     message: "expected value".to_string(),
/// });
/// assert!(format!("{}", err).contains("cached stats"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
