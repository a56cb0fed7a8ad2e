//! Structured logging setup
//!
//! Logs go to stderr so that `dicebins bins` output on stdout stays clean
//! for piping into a spreadsheet or file.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Picks `RUST_LOG` when set, otherwise the configured directives.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Installs the global subscriber: compact text, or JSON lines when
/// `logging.json` is set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
