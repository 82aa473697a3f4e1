//! Tracing setup for the command line

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ROLLOVER_LOG";

static TRACING_INIT: Once = Once::new();

/// Build the log filter: `ROLLOVER_LOG`, then `RUST_LOG`, then `default_filter`
pub fn log_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize the global subscriber, logging to stderr
///
/// Stdout is left to command output. Later calls are no-ops.
pub fn init_logging(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(log_filter(default_filter))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging("info");
        init_logging("debug");
    }

    #[test]
    fn test_default_filter_used() {
        if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
            assert_eq!(log_filter("warn").to_string(), "warn");
        }
    }
}
