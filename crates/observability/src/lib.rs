//! Logging setup shared by the binaries.

/// Initialize process-wide structured (JSON) logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_json();
}

/// Initialize human-readable logging for interactive use.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_pretty() {
    tracing::init_pretty();
}

/// Subscriber configuration (filters, formats).
pub mod tracing;
