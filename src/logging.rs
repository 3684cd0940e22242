//! Logging Infrastructure

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber with the given filter directive.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
