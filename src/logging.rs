//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter.
pub const LOG_ENV: &str = "BESS_LOG";

/// Installs a stderr `fmt` subscriber.
///
/// `BESS_LOG` takes precedence; otherwise `default_level` applies. Calling
/// it twice is harmless: the second install is ignored.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
