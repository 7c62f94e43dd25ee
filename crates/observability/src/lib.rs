//! Process-wide observability setup shared by the binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize observability for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops, which keeps
/// test binaries that spin up several servers from fighting over the global
/// subscriber.
pub fn init() {
    tracing::init();
}
