//! Command-line interface module.
//!
//! This module provides the CLI structure and the refresh runner for the
//! garden-notifier binary.

mod commands;
mod run;

pub use commands::Cli;
pub use run::run;
