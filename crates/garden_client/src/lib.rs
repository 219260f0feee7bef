//! Client for the Garden Notifier bot's public API.
//!
//! The [`BotApi`] trait is the seam the refresh orchestrator depends on;
//! [`ApiClient`] is the `reqwest` implementation used in production.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;

pub use client::{ApiClient, BotApi, DEFAULT_API_BASE_URL};
