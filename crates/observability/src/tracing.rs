//! Tracing subscriber initialization.
//!
//! Filtering is controlled by `RUST_LOG` (default `info`). Both formats write
//! to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// JSON logs + timestamps.
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Compact single-line logs. Defaults to `warn` so routine store activity
/// does not clutter terminal sessions.
pub fn init_pretty() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
