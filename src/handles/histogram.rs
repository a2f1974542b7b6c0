//! Histogram facades.

use prometheus::HistogramOpts;

use crate::registry::{MetricHandle, MetricKind, Metrics};

/// Histogram with caller-chosen or default buckets.
#[derive(Clone)]
pub struct Histogram {
    inner: prometheus::Histogram,
}

impl Histogram {
    /// Record one observation.
    pub fn observe(&self, value: f64) {
        self.inner.observe(value);
    }
}

impl Metrics {
    /// Get or create the histogram registered under `name` with explicit
    /// bucket upper bounds.
    ///
    /// `buckets` only takes effect on first creation; later calls for the
    /// same name return the existing handle regardless.
    pub fn histogram(&self, name: &str, buckets: &[f64]) -> Histogram {
        self.histogram_inner(name, buckets, None)
    }

    /// Get or create the histogram registered under `name`, with an
    /// explicit description used on first creation.
    pub fn histogram_with_description(
        &self,
        name: &str,
        buckets: &[f64],
        description: &str,
    ) -> Histogram {
        self.histogram_inner(name, buckets, Some(description))
    }

    /// Get or create a histogram under `name` with the backend's default
    /// latency buckets (5 ms to 10 s), suitable for response times in
    /// seconds.
    pub fn response_time_histogram(&self, name: &str) -> Histogram {
        self.histogram_inner(name, prometheus::DEFAULT_BUCKETS, None)
    }

    /// [`Metrics::response_time_histogram`] with an explicit description
    /// used on first creation.
    pub fn response_time_histogram_with_description(
        &self,
        name: &str,
        description: &str,
    ) -> Histogram {
        self.histogram_inner(name, prometheus::DEFAULT_BUCKETS, Some(description))
    }

    fn histogram_inner(&self, name: &str, buckets: &[f64], description: Option<&str>) -> Histogram {
        let handle = self.get_or_add(name, MetricKind::Histogram, description, |exported, help| {
            Ok(MetricHandle::Histogram(prometheus::Histogram::with_opts(
                HistogramOpts::new(exported, help).buckets(buckets.to_vec()),
            )?))
        });
        match handle {
            MetricHandle::Histogram(inner) => Histogram { inner },
            _ => unreachable!("histogram registration yielded a non-histogram handle"),
        }
    }
}
