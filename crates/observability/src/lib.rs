//! Tracing/logging setup shared by every embedding of the client.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
