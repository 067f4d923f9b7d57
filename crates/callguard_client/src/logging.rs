//! Logging bootstrap for binaries embedding the client.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. `RUST_LOG` wins over the
/// supplied default filter. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
