//! Hugin - canonical-naming facade over a Prometheus metrics backend
//!
//! Call sites ask for metrics by human-readable name, repeatedly, from
//! many threads, with whatever capitalisation they like. Hugin guarantees
//! that the same logical metric always resolves to the same underlying
//! backend object, that a name is never silently reused for two different
//! metric kinds, and that names are canonicalised into backend-legal,
//! prefix-qualified identifiers exactly once per distinct name.
//!
//! # Example
//!
//! ```rust
//! use hugin::Metrics;
//!
//! let metrics = Metrics::builder()
//!     .prefix("myapp")
//!     .registry(prometheus::Registry::new())
//!     .build();
//!
//! // Same metric from anywhere, any spelling.
//! metrics.counter("Requests.Served").inc();
//! metrics.counter("requests_served").inc();
//!
//! metrics.labelled_counter("visitors", &["country"]).inc(&["se"]);
//! metrics.gauge("queue_depth").set(12.0);
//! metrics.error("timeout");
//!
//! {
//!     let _timer = metrics.timer("startup");
//!     // timed work; observed into the "startup" summary on scope exit
//! }
//! ```
//!
//! # Name canonicalisation
//!
//! Characters the backend rejects (`.`, `-`, `#`, space) become `_`. By
//! default names are also lowercased, so `MyGauge` and `mygauge` are one
//! metric; a case-sensitive mode keeps them distinct and skips the
//! normalised-name cache. The configured prefix is joined with a
//! separator (default `_`) to form the exported name.
//!
//! # Kind safety
//!
//! Every registration carries a kind tag. Requesting an existing name
//! under a different kind panics immediately, before any backend state is
//! touched: two unrelated metrics sharing one exported name would corrupt
//! everything scraping them, so the registry favours a loud early stop
//! over silent misbehaviour.
//!
//! # Testing
//!
//! The `testing` cargo feature adds a `testing::Probe` for inspecting and
//! resetting a registry, and a deterministic timer factory for
//! timing-dependent assertions.

pub mod error;
pub mod handles;
pub mod naming;
pub mod options;
pub mod registry;
#[cfg(feature = "testing")]
pub mod testing;
pub mod timer;

pub use error::MetricsError;
pub use handles::{
    Counter, ERROR_COUNTER_NAME, ERROR_TYPE_LABEL, Gauge, Histogram, LabelledCounter,
    LabelledGauge, LabelledSummary, Summary,
};
pub use options::{DEFAULT_PREFIX_SEPARATOR, MetricDescriptions, MetricsBuilder};
pub use registry::{MetricKind, Metrics};
pub use timer::{RunningTimer, SystemTimerFactory, TimerFactory, TimerGuard};
