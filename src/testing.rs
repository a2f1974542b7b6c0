//! Test-support surface.
//!
//! Compiled only with the `testing` cargo feature. Nothing here is
//! reachable from runtime configuration; it exists so tests can inspect
//! what a registry exported, reset it between cases, and time scopes
//! deterministically.
//!
//! Integration tests enable the feature per test target:
//!
//! ```toml
//! [[test]]
//! name = "timer_test"
//! required-features = ["testing"]
//! ```

use std::collections::HashMap;
use std::sync::PoisonError;
use std::time::Duration;

use prometheus::proto::{Metric, MetricFamily};

use crate::handles::Summary;
use crate::registry::Metrics;
use crate::timer::{RunningTimer, TimerFactory};

/// Snapshot of one metric family's labelled series: label name, then label
/// value, to the full backend sample.
pub type LabelsMap = HashMap<String, HashMap<String, Metric>>;

/// Read-and-reset view over a [`Metrics`] instance.
pub struct Probe<'a> {
    metrics: &'a Metrics,
}

impl Metrics {
    /// Test-only inspection surface for this registry.
    pub fn probe(&self) -> Probe<'_> {
        Probe { metrics: self }
    }
}

impl Probe<'_> {
    /// Raw snapshot of everything gathered from the backend target.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.metrics.registry.gather()
    }

    /// Names of all metric families currently registered.
    pub fn metric_names(&self) -> Vec<String> {
        self.gather()
            .iter()
            .map(|family| family.get_name().to_owned())
            .collect()
    }

    /// The metric family exported under `name`.
    ///
    /// A name that was never registered is a normal negative, not a fault.
    pub fn family(&self, name: &str) -> Option<MetricFamily> {
        self.gather()
            .into_iter()
            .find(|family| family.get_name() == name)
    }

    /// Per-label snapshot of the family exported under `name`.
    pub fn label_values(&self, name: &str) -> Option<LabelsMap> {
        let family = self.family(name)?;
        let mut labels: LabelsMap = HashMap::new();
        for metric in family.get_metric() {
            for pair in metric.get_label() {
                labels
                    .entry(pair.get_name().to_owned())
                    .or_default()
                    .insert(pair.get_value().to_owned(), metric.clone());
            }
        }
        Some(labels)
    }

    /// Unregister every metric this registry created and forget all
    /// registrations and memoised names. Test isolation only.
    pub fn clear(&self) {
        let mut registrations = self
            .metrics
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for registration in registrations.values() {
            let _ = self
                .metrics
                .registry
                .unregister(registration.handle.collector());
        }
        registrations.clear();
        drop(registrations);

        let mut errors = self
            .metrics
            .errors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(counter) = errors.take() {
            let _ = self.metrics.registry.unregister(Box::new(counter));
        }
        drop(errors);

        self.metrics.names.clear();
    }
}

/// Timer factory that records a fixed elapsed duration, regardless of how
/// much wall-clock time actually passed.
///
/// ```rust
/// use std::time::Duration;
///
/// use hugin::Metrics;
/// use hugin::testing::FixedTimerFactory;
///
/// let registry = prometheus::Registry::new();
/// let metrics = Metrics::builder()
///     .registry(registry)
///     .timer_factory(FixedTimerFactory::new(Duration::from_secs(2)))
///     .build();
///
/// let elapsed = metrics.timer("slow_path").stop();
/// assert_eq!(elapsed, Duration::from_secs(2));
/// ```
pub struct FixedTimerFactory {
    elapsed: Duration,
}

impl FixedTimerFactory {
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }
}

impl TimerFactory for FixedTimerFactory {
    fn start(&self, target: Summary) -> Box<dyn RunningTimer> {
        Box::new(FixedTimer {
            elapsed: self.elapsed,
            target,
        })
    }
}

struct FixedTimer {
    elapsed: Duration,
    target: Summary,
}

impl RunningTimer for FixedTimer {
    fn stop(self: Box<Self>) -> Duration {
        self.target.observe(self.elapsed.as_secs_f64());
        self.elapsed
    }
}
