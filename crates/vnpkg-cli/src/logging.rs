//! Diagnostic logging setup.
//!
//! Progress output goes to stdout through `println!`. Diagnostics from the
//! packaging library go through `tracing` to stderr, filtered by `VNPKG_LOG`
//! (then `RUST_LOG`), defaulting to warnings only.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "VNPKG_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
