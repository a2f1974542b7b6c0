//! Per-kind metric facades.
//!
//! Each facade holds a handle into the backend and exposes the operations
//! appropriate to its kind; none of them contain logic beyond the
//! pass-through. Facades are obtained from the constructors on
//! [`Metrics`](crate::Metrics) (`counter`, `gauge`, `summary`, ...), which
//! route every request through the kind-checked get-or-create path, so
//! repeated construction calls for the same name are cheap and always
//! yield handles over the same underlying series.

mod counter;
mod error;
mod gauge;
mod histogram;
mod summary;

pub use counter::{Counter, LabelledCounter};
pub use gauge::{Gauge, LabelledGauge};
pub use histogram::Histogram;
pub use summary::{LabelledSummary, Summary};

pub use error::{ERROR_COUNTER_NAME, ERROR_TYPE_LABEL};
