//! Logging setup.
//!
//! Logs go to stderr so stdout stays clean for answers and JSON output.
//! `RUST_LOG` overrides the configured level.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let directives = format!("{level},ragchat={level},ragchat_core={level}");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
