//! Logging setup for applications embedding the packager.

use tracing_subscriber::EnvFilter;

use crate::error::{PackagerError, Result};

/// Install a formatted `tracing` subscriber
///
/// `RUST_LOG` takes precedence; otherwise logs at `info`, or `debug` when
/// `verbose` is set. Fails if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| PackagerError::generic(format!("failed to install logger: {}", e)))
}
