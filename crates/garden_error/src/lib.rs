//! Error types for the Garden Notifier site refresher.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! None of these errors are ever shown to a visitor. The refresh orchestrator
//! catches them, logs them, and degrades to cached or fallback data.
//!
//! # Examples
//!
//! ```
//! use garden_error::{FetchError, FetchErrorKind, GardenResult};
//!
//! fn fetch_stats() -> GardenResult<String> {
//!     Err(FetchError::new(FetchErrorKind::Status { status: 503 }))?
//! }
//!
//! match fetch_stats() {
//!     Ok(body) => println!("Got: {}", body),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod fetch;
mod json;
mod storage;

pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use error::{GardenError, GardenErrorKind, GardenResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
