//! Gauge facades.

use prometheus::Opts;

use crate::registry::{MetricHandle, MetricKind, Metrics};

/// Value that can go up and down.
#[derive(Clone)]
pub struct Gauge {
    inner: prometheus::Gauge,
}

impl Gauge {
    /// Set to an absolute value.
    pub fn set(&self, value: f64) {
        self.inner.set(value);
    }

    /// Increment by one.
    pub fn inc(&self) {
        self.inner.inc();
    }

    /// Increment by `amount`.
    pub fn inc_by(&self, amount: f64) {
        self.inner.add(amount);
    }

    /// Decrement by one.
    pub fn dec(&self) {
        self.inner.dec();
    }

    /// Decrement by `amount`.
    pub fn dec_by(&self, amount: f64) {
        self.inner.sub(amount);
    }
}

/// Gauge partitioned by one or more label dimensions.
#[derive(Clone)]
pub struct LabelledGauge {
    inner: prometheus::GaugeVec,
}

impl LabelledGauge {
    /// Set the series for the given label values to an absolute value.
    pub fn set(&self, label_values: &[&str], value: f64) {
        self.inner.with_label_values(label_values).set(value);
    }

    /// Increment the series for the given label values by one.
    pub fn inc(&self, label_values: &[&str]) {
        self.inner.with_label_values(label_values).inc();
    }

    /// Increment the series for the given label values by `amount`.
    pub fn inc_by(&self, label_values: &[&str], amount: f64) {
        self.inner.with_label_values(label_values).add(amount);
    }

    /// Decrement the series for the given label values by one.
    pub fn dec(&self, label_values: &[&str]) {
        self.inner.with_label_values(label_values).dec();
    }

    /// Decrement the series for the given label values by `amount`.
    pub fn dec_by(&self, label_values: &[&str], amount: f64) {
        self.inner.with_label_values(label_values).sub(amount);
    }
}

impl Metrics {
    /// Get or create the gauge registered under `name`.
    pub fn gauge(&self, name: &str) -> Gauge {
        self.gauge_inner(name, None)
    }

    /// Get or create the gauge registered under `name`, with an explicit
    /// description used on first creation.
    pub fn gauge_with_description(&self, name: &str, description: &str) -> Gauge {
        self.gauge_inner(name, Some(description))
    }

    fn gauge_inner(&self, name: &str, description: Option<&str>) -> Gauge {
        let handle = self.get_or_add(name, MetricKind::Gauge, description, |exported, help| {
            Ok(MetricHandle::Gauge(prometheus::Gauge::with_opts(
                Opts::new(exported, help),
            )?))
        });
        match handle {
            MetricHandle::Gauge(inner) => Gauge { inner },
            _ => unreachable!("gauge registration yielded a non-gauge handle"),
        }
    }

    /// Get or create the labelled gauge registered under `name`.
    ///
    /// `label_names` only takes effect on first creation; later calls for
    /// the same name return the existing handle regardless.
    pub fn labelled_gauge(&self, name: &str, label_names: &[&str]) -> LabelledGauge {
        self.labelled_gauge_inner(name, label_names, None)
    }

    /// Get or create the labelled gauge registered under `name`, with an
    /// explicit description used on first creation.
    pub fn labelled_gauge_with_description(
        &self,
        name: &str,
        label_names: &[&str],
        description: &str,
    ) -> LabelledGauge {
        self.labelled_gauge_inner(name, label_names, Some(description))
    }

    fn labelled_gauge_inner(
        &self,
        name: &str,
        label_names: &[&str],
        description: Option<&str>,
    ) -> LabelledGauge {
        let handle = self.get_or_add(
            name,
            MetricKind::LabelledGauge,
            description,
            |exported, help| {
                Ok(MetricHandle::LabelledGauge(prometheus::GaugeVec::new(
                    Opts::new(exported, help),
                    label_names,
                )?))
            },
        );
        match handle {
            MetricHandle::LabelledGauge(inner) => LabelledGauge { inner },
            _ => unreachable!("labelled gauge registration yielded a mismatched handle"),
        }
    }
}
