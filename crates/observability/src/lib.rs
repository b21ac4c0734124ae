//! Tracing/logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(verbose: bool) {
    tracing::init(verbose);
}

/// Tracing configuration (filter, writer, format).
pub mod tracing;
