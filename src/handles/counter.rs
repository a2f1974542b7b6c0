//! Counter facades.

use prometheus::Opts;

use crate::registry::{MetricHandle, MetricKind, Metrics};

/// Monotonically increasing counter.
#[derive(Clone)]
pub struct Counter {
    inner: prometheus::Counter,
}

impl Counter {
    /// Increment by one.
    pub fn inc(&self) {
        self.inner.inc();
    }

    /// Increment by an arbitrary non-negative amount.
    pub fn inc_by(&self, amount: f64) {
        self.inner.inc_by(amount);
    }
}

/// Counter partitioned by one or more label dimensions.
#[derive(Clone)]
pub struct LabelledCounter {
    inner: prometheus::CounterVec,
}

impl LabelledCounter {
    /// Increment the series for the given label values by one.
    pub fn inc(&self, label_values: &[&str]) {
        self.inner.with_label_values(label_values).inc();
    }

    /// Increment the series for the given label values by `amount`.
    pub fn inc_by(&self, label_values: &[&str], amount: f64) {
        self.inner.with_label_values(label_values).inc_by(amount);
    }
}

impl Metrics {
    /// Get or create the counter registered under `name`.
    pub fn counter(&self, name: &str) -> Counter {
        self.counter_inner(name, None)
    }

    /// Get or create the counter registered under `name`, with an explicit
    /// description used on first creation.
    pub fn counter_with_description(&self, name: &str, description: &str) -> Counter {
        self.counter_inner(name, Some(description))
    }

    fn counter_inner(&self, name: &str, description: Option<&str>) -> Counter {
        let handle = self.get_or_add(name, MetricKind::Counter, description, |exported, help| {
            Ok(MetricHandle::Counter(prometheus::Counter::with_opts(
                Opts::new(exported, help),
            )?))
        });
        match handle {
            MetricHandle::Counter(inner) => Counter { inner },
            _ => unreachable!("counter registration yielded a non-counter handle"),
        }
    }

    /// Get or create the labelled counter registered under `name`.
    ///
    /// `label_names` only takes effect on first creation; later calls for
    /// the same name return the existing handle regardless.
    pub fn labelled_counter(&self, name: &str, label_names: &[&str]) -> LabelledCounter {
        self.labelled_counter_inner(name, label_names, None)
    }

    /// Get or create the labelled counter registered under `name`, with an
    /// explicit description used on first creation.
    pub fn labelled_counter_with_description(
        &self,
        name: &str,
        label_names: &[&str],
        description: &str,
    ) -> LabelledCounter {
        self.labelled_counter_inner(name, label_names, Some(description))
    }

    fn labelled_counter_inner(
        &self,
        name: &str,
        label_names: &[&str],
        description: Option<&str>,
    ) -> LabelledCounter {
        let handle = self.get_or_add(
            name,
            MetricKind::LabelledCounter,
            description,
            |exported, help| {
                Ok(MetricHandle::LabelledCounter(prometheus::CounterVec::new(
                    Opts::new(exported, help),
                    label_names,
                )?))
            },
        );
        match handle {
            MetricHandle::LabelledCounter(inner) => LabelledCounter { inner },
            _ => unreachable!("labelled counter registration yielded a mismatched handle"),
        }
    }
}
