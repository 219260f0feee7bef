//! Core data types for the Garden Notifier site refresher.
//!
//! This crate holds the two resources the marketing page shows (bot statistics
//! and the slash-command list), the raw API shapes they are derived from, and
//! the small formatting helpers used when rendering them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod format;
mod resource;
mod stats;

pub use command::{
    CommandCategory, CommandDescriptor, CommandsResponse, RawCommand, default_commands,
};
pub use format::{format_number, format_uptime};
pub use resource::ResourceKind;
pub use stats::{NotificationTotals, RawStats, StatsResponse, StatsSnapshot, UptimeReport};
