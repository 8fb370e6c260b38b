//! Logging initialization
//!
//! Application code logs through the `log` facade. `init_logger` installs a
//! `tracing-subscriber` formatter and forwards `log` records into it.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Maps a `LOG_LEVEL` name to an `EnvFilter` directive.
///
/// `CRITICAL` has no direct counterpart and is treated as `error`.
pub fn filter_directive(level: &str) -> &'static str {
    match level.to_uppercase().as_str() {
        "CRITICAL" | "ERROR" => "error",
        "WARNING" | "WARN" => "warn",
        "DEBUG" => "debug",
        "TRACE" => "trace",
        _ => "info",
    }
}

/// Initialize the global logger.
///
/// `RUST_LOG` takes priority when set; otherwise `level` (a `LOG_LEVEL` name)
/// decides the verbosity.
///
/// # Errors
/// Fails if a logger or subscriber is already installed.
pub fn init_logger(level: &str) -> Result<()> {
    tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to bridge log records: {}", e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("warning"), "warn");
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("nonsense"), "info");
    }
}
