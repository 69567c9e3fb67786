#![deny(missing_docs)]

//! # Logging
//!
//! Installs the `tracing` subscriber. The filter comes from `RUST_LOG`, then
//! `OASGEN_LOG`, then defaults to `info`. Logs go to stderr so stdout carries
//! only the validation report.

use crate::error::{CliError, CliResult};
use tracing_subscriber::EnvFilter;

const LEVEL_VAR: &str = "OASGEN_LOG";
const DEFAULT_LEVEL: &str = "info";

/// Builds the filter from the environment.
pub fn env_filter() -> CliResult<EnvFilter> {
    let level = std::env::var(LEVEL_VAR).unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .map_err(|e| CliError::General(format!("Invalid log filter '{}': {}", level, e)))
}

/// Initializes the global subscriber.
pub fn init() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| CliError::General(format!("Failed to install logger: {}", e)))
}
