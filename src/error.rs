//! Hugin error types.

/// Errors surfaced by fallible registry operations.
///
/// Note that a get-or-create request reusing an existing name for a
/// different metric kind is *not* an error value: it panics. That
/// situation is a bug at the call site, and surfacing it loudly before any
/// backend state changes beats exporting two unrelated metrics under one
/// name.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The backend registry refused a collector, e.g. a duplicate
    /// descriptor or an invalid name.
    #[error("backend registration failed: {0}")]
    Registration(#[from] prometheus::Error),
}
