//! The kind-checked get-or-create metric registry.
//!
//! [`Metrics`] is a passive, thread-safe structure invoked synchronously
//! from arbitrary threads. It owns the name resolution policy, the
//! registration map, and the backend registry target. Facade constructors
//! (see [`crate::handles`]) call [`Metrics::get_or_add`] with a builder
//! closure; the registry itself never learns how a backend object is
//! constructed, it only tags each registration with its [`MetricKind`] and
//! refuses to hand the same name out under two different kinds.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use prometheus::core::Collector;
use tracing::{debug, warn};

use crate::error::MetricsError;
use crate::naming::NameCache;
use crate::options::{MetricDescriptions, MetricsBuilder};
use crate::timer::TimerFactory;

/// Discriminator for the fixed, closed set of metric kinds a registration
/// can hold. Once a metric key is registered under a kind, that kind is
/// immutable for the life of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    LabelledCounter,
    Gauge,
    LabelledGauge,
    Summary,
    LabelledSummary,
    Histogram,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Counter => "counter",
            MetricKind::LabelledCounter => "labelled counter",
            MetricKind::Gauge => "gauge",
            MetricKind::LabelledGauge => "labelled gauge",
            MetricKind::Summary => "summary",
            MetricKind::LabelledSummary => "labelled summary",
            MetricKind::Histogram => "histogram",
        };
        f.write_str(name)
    }
}

/// Tagged union over the backend handle types. Cloning is cheap; the
/// backend handles are internally reference-counted, so clones observe the
/// same underlying series.
#[derive(Clone)]
pub(crate) enum MetricHandle {
    Counter(prometheus::Counter),
    LabelledCounter(prometheus::CounterVec),
    Gauge(prometheus::Gauge),
    LabelledGauge(prometheus::GaugeVec),
    Summary(prometheus::Histogram),
    LabelledSummary(prometheus::HistogramVec),
    Histogram(prometheus::Histogram),
}

impl MetricHandle {
    /// The handle as a boxed backend collector, for (un)registration.
    pub(crate) fn collector(&self) -> Box<dyn Collector> {
        match self {
            MetricHandle::Counter(c) => Box::new(c.clone()),
            MetricHandle::LabelledCounter(c) => Box::new(c.clone()),
            MetricHandle::Gauge(g) => Box::new(g.clone()),
            MetricHandle::LabelledGauge(g) => Box::new(g.clone()),
            MetricHandle::Summary(h) => Box::new(h.clone()),
            MetricHandle::LabelledSummary(h) => Box::new(h.clone()),
            MetricHandle::Histogram(h) => Box::new(h.clone()),
        }
    }
}

/// One entry in the registration map.
pub(crate) struct Registration {
    pub(crate) kind: MetricKind,
    pub(crate) handle: MetricHandle,
}

/// The get-or-create authority for named metrics.
///
/// Created once at component startup via [`Metrics::builder`] and shared
/// (typically behind an `Arc`) for the lifetime of the owning component.
/// All operations take `&self` and are safe from any number of threads.
///
/// ```rust
/// use hugin::Metrics;
///
/// let metrics = Metrics::builder()
///     .prefix("myapp")
///     .registry(prometheus::Registry::new())
///     .build();
///
/// metrics.counter("requests_served").inc();
/// metrics.labelled_counter("visitors", &["country"]).inc(&["se"]);
/// ```
pub struct Metrics {
    pub(crate) registry: prometheus::Registry,
    pub(crate) prefix: String,
    pub(crate) descriptions: MetricDescriptions,
    pub(crate) names: NameCache,
    pub(crate) registrations: RwLock<HashMap<String, Registration>>,
    pub(crate) errors: RwLock<Option<prometheus::CounterVec>>,
    pub(crate) timer_factory: Arc<dyn TimerFactory>,
}

impl Metrics {
    /// Create a builder for configuring a registry instance.
    pub fn builder() -> MetricsBuilder {
        MetricsBuilder::new()
    }

    /// Register a pre-built collector with this registry's backend target.
    ///
    /// Escape hatch for collectors constructed outside the get-or-create
    /// path. Such collectors bypass name canonicalisation and kind
    /// checking entirely.
    pub fn register_collector<C>(&self, collector: C) -> Result<(), MetricsError>
    where
        C: Collector + 'static,
    {
        self.registry.register(Box::new(collector))?;
        Ok(())
    }

    /// Resolve `name` and return the handle registered under it, building
    /// and registering a new backend object on first use.
    ///
    /// The builder closure receives the exported (prefix-qualified) name
    /// and the resolved description. It runs under the registration map's
    /// exclusive lock, which is what guarantees at most one backend
    /// construction per key no matter how many threads race on first use.
    /// Construction is expected to happen once per key for the life of the
    /// registry, so the hold time does not matter in practice.
    ///
    /// # Panics
    ///
    /// If the key is already registered under a different kind, or if the
    /// backend rejects the exported name or description as malformed. Both
    /// are call-site bugs; neither touches registry or backend state.
    pub(crate) fn get_or_add<F>(
        &self,
        name: &str,
        kind: MetricKind,
        description: Option<&str>,
        build: F,
    ) -> MetricHandle
    where
        F: FnOnce(&str, &str) -> Result<MetricHandle, prometheus::Error>,
    {
        let key = self.names.resolve(name);

        {
            let registrations = self.registrations.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = registrations.get(&key) {
                self.check_kind(&key, entry.kind, kind);
                return entry.handle.clone();
            }
        }

        let mut registrations = self.registrations.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have published this key while we waited for
        // the exclusive lock.
        if let Some(entry) = registrations.get(&key) {
            self.check_kind(&key, entry.kind, kind);
            return entry.handle.clone();
        }

        let exported = self.exported_name(&key);
        let help = self.best_description(&key, description);
        let handle = build(&exported, &help)
            .unwrap_or_else(|e| panic!("failed to build metric {exported}: {e}"));
        self.register_with_backend(&exported, &handle);
        registrations.insert(
            key,
            Registration {
                kind,
                handle: handle.clone(),
            },
        );
        handle
    }

    fn check_kind(&self, key: &str, stored: MetricKind, requested: MetricKind) {
        if stored != requested {
            panic!(
                "{} is already used for a different kind of metric (registered as {stored}, requested as {requested})",
                self.exported_name(key)
            );
        }
    }

    fn register_with_backend(&self, exported: &str, handle: &MetricHandle) {
        match self.registry.register(handle.collector()) {
            Ok(()) => debug!(metric = exported, "registered metric"),
            Err(e) => warn!(metric = exported, error = %e, "backend registry refused metric"),
        }
    }

    /// The exported name: configured prefix (already separator-suffixed)
    /// plus the metric key.
    pub(crate) fn exported_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Resolve the description recorded at creation time. An explicit
    /// non-empty argument wins; otherwise the description mapping is
    /// consulted by metric key; otherwise the exported name stands in for
    /// itself. The backend rejects empty help texts, so a mapped-but-empty
    /// entry also falls through to the exported name.
    fn best_description(&self, key: &str, explicit: Option<&str>) -> String {
        match explicit {
            Some(desc) if !desc.is_empty() => desc.to_owned(),
            _ => match self.descriptions.get(key) {
                Some(mapped) if !mapped.is_empty() => mapped.clone(),
                _ => self.exported_name(key),
            },
        }
    }
}
