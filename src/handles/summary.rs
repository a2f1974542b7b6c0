//! Summary facades.
//!
//! The Rust prometheus client deliberately does not implement the summary
//! type, so summary-kind registrations are backed by a histogram with the
//! backend's default buckets. The exported `_count` and `_sum` series are
//! identical to what a summary would carry; client-side quantile
//! objectives are not. Summary and histogram registrations remain distinct
//! kinds: reusing a summary name for a histogram still faults.

use prometheus::HistogramOpts;

use crate::registry::{MetricHandle, MetricKind, Metrics};

/// Summary-kind metric recording a stream of observations.
#[derive(Clone)]
pub struct Summary {
    inner: prometheus::Histogram,
}

impl Summary {
    pub(crate) fn new(inner: prometheus::Histogram) -> Self {
        Self { inner }
    }

    /// Record one observation.
    pub fn observe(&self, value: f64) {
        self.inner.observe(value);
    }
}

/// Summary partitioned by one or more label dimensions.
#[derive(Clone)]
pub struct LabelledSummary {
    inner: prometheus::HistogramVec,
}

impl LabelledSummary {
    /// Record one observation in the series for the given label values.
    pub fn observe(&self, label_values: &[&str], value: f64) {
        self.inner.with_label_values(label_values).observe(value);
    }

    /// The single series for the given label values, as a [`Summary`].
    ///
    /// Labelled timers use this to pin their observation target to one
    /// series up front.
    pub fn with_label_values(&self, label_values: &[&str]) -> Summary {
        Summary::new(self.inner.with_label_values(label_values))
    }
}

impl Metrics {
    /// Get or create the summary registered under `name`.
    pub fn summary(&self, name: &str) -> Summary {
        self.summary_inner(name, None)
    }

    /// Get or create the summary registered under `name`, with an explicit
    /// description used on first creation.
    pub fn summary_with_description(&self, name: &str, description: &str) -> Summary {
        self.summary_inner(name, Some(description))
    }

    fn summary_inner(&self, name: &str, description: Option<&str>) -> Summary {
        let handle = self.get_or_add(name, MetricKind::Summary, description, |exported, help| {
            Ok(MetricHandle::Summary(prometheus::Histogram::with_opts(
                HistogramOpts::new(exported, help),
            )?))
        });
        match handle {
            MetricHandle::Summary(inner) => Summary::new(inner),
            _ => unreachable!("summary registration yielded a non-summary handle"),
        }
    }

    /// Get or create the labelled summary registered under `name`.
    ///
    /// `label_names` only takes effect on first creation; later calls for
    /// the same name return the existing handle regardless.
    pub fn labelled_summary(&self, name: &str, label_names: &[&str]) -> LabelledSummary {
        self.labelled_summary_inner(name, label_names, None)
    }

    /// Get or create the labelled summary registered under `name`, with an
    /// explicit description used on first creation.
    pub fn labelled_summary_with_description(
        &self,
        name: &str,
        label_names: &[&str],
        description: &str,
    ) -> LabelledSummary {
        self.labelled_summary_inner(name, label_names, Some(description))
    }

    fn labelled_summary_inner(
        &self,
        name: &str,
        label_names: &[&str],
        description: Option<&str>,
    ) -> LabelledSummary {
        let handle = self.get_or_add(
            name,
            MetricKind::LabelledSummary,
            description,
            |exported, help| {
                Ok(MetricHandle::LabelledSummary(
                    prometheus::HistogramVec::new(HistogramOpts::new(exported, help), label_names)?,
                ))
            },
        );
        match handle {
            MetricHandle::LabelledSummary(inner) => LabelledSummary { inner },
            _ => unreachable!("labelled summary registration yielded a mismatched handle"),
        }
    }
}
