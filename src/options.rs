//! Registry configuration.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::naming::{NameCache, normalise_and_lowercase};
use crate::registry::Metrics;
use crate::timer::{SystemTimerFactory, TimerFactory};

/// Mapping from metric key to description text, consulted when a metric is
/// created without an explicit description.
///
/// Keys are metric keys, i.e. the canonical, case-policy-applied name
/// *before* the prefix is applied.
pub type MetricDescriptions = HashMap<String, String>;

/// Separator joining the configured prefix to metric names when none is
/// set explicitly, per backend convention.
pub const DEFAULT_PREFIX_SEPARATOR: &str = "_";

/// Builder for [`Metrics`] instances.
///
/// Every option has a sensible default, so `build()` cannot fail:
///
/// ```rust
/// use hugin::Metrics;
///
/// let metrics = Metrics::builder()
///     .prefix("my-service")
///     .describe("requests", "Requests handled since startup")
///     .registry(prometheus::Registry::new())
///     .build();
///
/// metrics.counter("requests").inc();
/// ```
///
/// The plain-data options (prefix, separator, case policy, descriptions)
/// are serialisable, so a metrics section can live in an application's
/// config file. The backend registry target and the timer factory are
/// code-level wiring and always start out unset after deserialisation.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsBuilder {
    prefix: String,
    separator: Option<String>,
    case_sensitive: bool,
    descriptions: MetricDescriptions,
    #[serde(skip)]
    registry: Option<prometheus::Registry>,
    #[serde(skip)]
    timer_factory: Option<Arc<dyn TimerFactory>>,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to every exported metric name.
    ///
    /// The prefix is normalised and lowercased like any other name, then
    /// suffixed with the separator if it does not already end with it.
    /// `x-service#123` therefore exports `my_metric` as
    /// `x_service_123_my_metric`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Separator joining the prefix to metric names. Default: `_`.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Backend registry the constructed metrics register with. Default:
    /// the process-wide default registry.
    pub fn registry(mut self, registry: prometheus::Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the whole description mapping.
    pub fn descriptions(mut self, descriptions: MetricDescriptions) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Add one description mapping entry, keyed by metric key.
    pub fn describe(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(key.into(), text.into());
        self
    }

    /// Treat differently-cased names as distinct metrics.
    ///
    /// Off by default: `MyGauge`, `mygauge` and `MYGAUGE` all resolve to
    /// one registration. Sensitive resolution skips the normalised-name
    /// memo entirely and is marginally faster per lookup.
    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.case_sensitive = sensitive;
        self
    }

    /// Replace the wall-clock timer factory, e.g. with
    /// `FixedTimerFactory` from the testing module to make elapsed-time
    /// observations deterministic.
    pub fn timer_factory(mut self, factory: impl TimerFactory + 'static) -> Self {
        self.timer_factory = Some(Arc::new(factory));
        self
    }

    /// Build the registry instance. Unset options resolve to defaults;
    /// this never fails.
    pub fn build(self) -> Metrics {
        let separator = self
            .separator
            .unwrap_or_else(|| DEFAULT_PREFIX_SEPARATOR.to_owned());
        let mut prefix = normalise_and_lowercase(&self.prefix);
        if !prefix.is_empty() && !prefix.ends_with(&separator) {
            prefix.push_str(&separator);
        }
        let registry = self
            .registry
            .unwrap_or_else(|| prometheus::default_registry().clone());
        let timer_factory = self
            .timer_factory
            .unwrap_or_else(|| Arc::new(SystemTimerFactory));

        Metrics {
            registry,
            prefix,
            descriptions: self.descriptions,
            names: NameCache::new(self.case_sensitive),
            registrations: RwLock::new(HashMap::new()),
            errors: RwLock::new(None),
            timer_factory,
        }
    }
}
