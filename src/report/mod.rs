//! Console reporting for model performance.
//!
//! The two reporting operations mirror the observable stdout contract:
//! [`print_metrics`] emits the fixed-order, fixed-width metric table and
//! [`print_confusion_matrix`] the binary confusion-matrix breakdown. Both
//! build a report struct first; the struct's `Display` impl *is* the
//! printed text, so callers can capture, compare, or export instead of
//! printing.

pub mod confusion;
pub mod export;
pub mod metrics;

pub use confusion::{print_confusion_matrix, ConfusionMatrixReport};
pub use metrics::{print_metrics, MetricReport};
