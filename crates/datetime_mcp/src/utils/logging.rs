use tracing_subscriber::{EnvFilter, prelude::*};

use crate::core::error::{StartupError, StartupResult};

/// Initialize logging based on environment configuration
///
/// Logs always go to stderr; stdout carries the MCP protocol.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized or skipped
/// - `Err(StartupError::LoggingInitialization)` if initialization fails
pub fn init_logging() -> StartupResult<()> {
    // Check if RUST_LOG is set, skip logging if not
    if std::env::var("RUST_LOG").is_err() {
        return Ok(());
    }

    let env_filter = EnvFilter::from_default_env();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| StartupError::LoggingInitialization(e.to_string()))?;

    Ok(())
}
