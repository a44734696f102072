//! Tracing setup for the bookstore binary
//!
//! Usage:
//!   bookstore --debug ...                  # Debug logging to console
//!   RUST_LOG=bookstore_server=debug ...    # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                               # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Running under the Lambda runtime: the platform timestamps each line
    pub lambda: bool,
}

/// Initialize tracing with console output
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr) // stdout carries command output
        .compact();

    if config.lambda {
        builder
            .with_ansi(false)
            .without_time()
            .try_init()
            .map_err(|err| anyhow!(err))
    } else {
        builder.try_init().map_err(|err| anyhow!(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_quiet_console() {
        let config = TracingConfig::default();
        assert!(!config.debug);
        assert!(!config.lambda);
    }
}
