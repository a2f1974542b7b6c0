//! Elapsed-time observation with a pluggable clock.
//!
//! A timer is ephemeral: it starts, and exactly once it stops, producing
//! an elapsed duration that is simultaneously recorded into its
//! observation target. The target is always a summary obtained through
//! the ordinary get-or-create path; timers add no storage of their own.
//!
//! The clock sits behind [`TimerFactory`] so that timing-dependent code
//! can be tested without sleeping: see
//! `FixedTimerFactory` in the testing module, which records a
//! caller-configured duration no matter how long the scope really took.

use std::time::{Duration, Instant};

use crate::handles::Summary;
use crate::registry::Metrics;

/// Starts timers against an observation target.
pub trait TimerFactory: Send + Sync {
    /// Start a timer that will record into `target` when stopped.
    fn start(&self, target: Summary) -> Box<dyn RunningTimer>;
}

/// A started timer.
///
/// Stopping consumes the timer, records the elapsed value into the
/// observation target, and returns it. This happens exactly once.
pub trait RunningTimer: Send {
    fn stop(self: Box<Self>) -> Duration;
}

/// The default factory: wall-clock time via [`Instant`].
pub struct SystemTimerFactory;

impl TimerFactory for SystemTimerFactory {
    fn start(&self, target: Summary) -> Box<dyn RunningTimer> {
        Box::new(SystemTimer {
            started: Instant::now(),
            target,
        })
    }
}

struct SystemTimer {
    started: Instant,
    target: Summary,
}

impl RunningTimer for SystemTimer {
    fn stop(self: Box<Self>) -> Duration {
        let elapsed = self.started.elapsed();
        self.target.observe(elapsed.as_secs_f64());
        elapsed
    }
}

/// Scope guard over a running timer.
///
/// The timer stops exactly once on every exit path: explicitly through
/// [`TimerGuard::stop`], which returns the elapsed duration, or when the
/// guard is dropped (normal return or unwind).
///
/// ```rust
/// use hugin::Metrics;
///
/// let metrics = Metrics::builder()
///     .registry(prometheus::Registry::new())
///     .build();
///
/// {
///     let _timer = metrics.timer("index_rebuild");
///     // timed work; one observation is recorded when the scope ends
/// }
/// ```
pub struct TimerGuard {
    timer: Option<Box<dyn RunningTimer>>,
}

impl TimerGuard {
    pub(crate) fn new(timer: Box<dyn RunningTimer>) -> Self {
        Self { timer: Some(timer) }
    }

    /// Stop the timer now and return the elapsed duration.
    pub fn stop(mut self) -> Duration {
        // `stop` consumes the guard, so the timer is still armed here.
        self.timer.take().expect("timer stopped twice").stop()
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

impl Metrics {
    /// Start a timer whose elapsed time is recorded into the summary
    /// registered under `name`.
    pub fn timer(&self, name: &str) -> TimerGuard {
        let target = self.summary(name);
        TimerGuard::new(self.timer_factory.start(target))
    }

    /// Start a timer recording into one labelled series of the summary
    /// registered under `name`.
    ///
    /// The summary is created with the single label dimension
    /// `label_name`; the timer observes the series for `label_value`.
    pub fn labelled_timer(&self, name: &str, label_name: &str, label_value: &str) -> TimerGuard {
        let target = self
            .labelled_summary(name, &[label_name])
            .with_label_values(&[label_value]);
        TimerGuard::new(self.timer_factory.start(target))
    }
}
