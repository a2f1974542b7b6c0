//! The shared error counter.
//!
//! A single labelled counter, exported as `<prefix>errors` with one
//! `error_type` label dimension, created lazily on the first
//! [`Metrics::error`] call. It is a hard-coded metric, not a name resolved
//! through the registry map, so the kind-tag protection does not apply;
//! its first creation is guarded by the same shared/exclusive lock
//! discipline as ordinary registrations.

use std::sync::PoisonError;

use prometheus::Opts;
use tracing::{debug, warn};

use crate::registry::Metrics;

/// Unprefixed name the shared error counter is exported under.
pub const ERROR_COUNTER_NAME: &str = "errors";

/// Label dimension distinguishing error types on the shared counter.
pub const ERROR_TYPE_LABEL: &str = "error_type";

impl Metrics {
    /// Count one error of the given type.
    ///
    /// All error types share one counter; `name` becomes the value of its
    /// `error_type` label. The counter is created (and registered with the
    /// backend) at most once per registry instance, on first use.
    pub fn error(&self, name: &str) {
        self.error_counter().with_label_values(&[name]).inc();
    }

    fn error_counter(&self) -> prometheus::CounterVec {
        {
            let errors = self.errors.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = errors.as_ref() {
                return counter.clone();
            }
        }

        let mut errors = self.errors.write().unwrap_or_else(PoisonError::into_inner);
        // Lost the creation race: another thread got the write lock first.
        if let Some(counter) = errors.as_ref() {
            return counter.clone();
        }

        let exported = self.exported_name(ERROR_COUNTER_NAME);
        let counter = prometheus::CounterVec::new(
            Opts::new(&exported, &exported),
            &[ERROR_TYPE_LABEL],
        )
        .unwrap_or_else(|e| panic!("failed to build error counter {exported}: {e}"));
        match self.registry.register(Box::new(counter.clone())) {
            Ok(()) => debug!(metric = %exported, "registered error counter"),
            Err(e) => warn!(metric = %exported, error = %e, "backend registry refused error counter"),
        }
        *errors = Some(counter.clone());
        counter
    }
}
