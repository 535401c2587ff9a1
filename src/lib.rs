//! # Evalkit
//!
//! A pure Rust toolkit for evaluating and visualizing the performance of
//! already-trained classification and regression models: standard metrics,
//! printed confusion-matrix reports, learning-curve and ROC figures, and
//! confidence-threshold analysis.
//!
//! Every operation is a stateless transformation from (predictions,
//! labels, optional feature matrix) to a printed report, a figure, or a
//! filtered table. The toolkit holds no models, no datasets, and no
//! ambient plotting state.
//!
//! ## Features
//!
//! - **Metrics**: accuracy, precision (binary/micro/macro), recall, F1,
//!   ROC-AUC, log loss, average precision, R², MSE, confusion matrices,
//!   ROC curves, and sklearn-style classification reports.
//! - **Reports**: fixed-width console reports with four stable decimals,
//!   plus JSON/CSV export.
//! - **Figures**: confusion-matrix heat-maps, learning curves with
//!   mean ± std bands, and per-class ROC plots, rendered off-screen and
//!   saved as PNG.
//! - **Partitioning**: select the correctly or wrongly classified rows of
//!   an evaluation set, aligned with their feature rows.
//! - **Confidence analysis**: conditional accuracy and coverage above a
//!   probability threshold.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evalkit_rust::metrics::ConfusionMatrix;
//! use evalkit_rust::report::print_metrics;
//! use evalkit_rust::viz::plot_confusion_matrix;
//! use ndarray::array;
//!
//! # fn main() -> evalkit_rust::Result<()> {
//! let y_true = array![1.0, 1.0, 0.0, 0.0];
//! let y_pred = array![1.0, 0.0, 0.0, 0.0];
//! let y_score = array![0.8, 0.4, 0.3, 0.1];
//!
//! // Console report of the standard metric battery.
//! print_metrics(&y_true.view(), &y_pred.view(), &y_score.view(), "test")?;
//!
//! // Confusion-matrix heat-map, saved as PNG.
//! let cm = ConfusionMatrix::from_labels(&y_true.view(), &y_pred.view(), None)?;
//! let figure = plot_confusion_matrix(&cm, &["negative", "positive"], false)?;
//! figure.save("confusion.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error handling and fundamental types
//! - [`metrics`]: classification and regression metric formulas
//! - [`report`]: console reports and export
//! - [`viz`]: figure rendering
//! - [`partition`]: correctness-based dataset partitioning
//! - [`confidence`]: confidence-threshold analysis
//! - [`model`]: the fitted-model collaborator contracts
//! - [`selection`]: K-fold splitting and the learning-curve computation

#![doc(html_root_url = "https://docs.rs/evalkit-rust/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Metric computation
pub mod metrics;

// Console reporting and export
pub mod report;

// Figure rendering
pub mod viz;

// Dataset partitioning by correctness
pub mod partition;

// Confidence-threshold analysis
pub mod confidence;

// Collaborator contracts for fitted models
pub mod model;

// Cross-validation plumbing
pub mod selection;

// Re-export core functionality for convenience
pub use crate::core::{
    error::{EvalError, Result},
    types::{Average, ClassIndex, Label, Score},
};

// Re-export the operation surface
pub use confidence::{check_model_confidence, check_prediction_confidence, ConfidenceReport};
pub use metrics::{classification_report, ConfusionMatrix, RocCurve};
pub use model::{Estimator, Model};
pub use partition::{wrongly_classified, PartitionTable};
pub use report::{print_confusion_matrix, print_metrics, ConfusionMatrixReport, MetricReport};
pub use selection::{learning_curve, KFold, LearningCurve};
pub use viz::{auc_plot, plot_confusion_matrix, plot_learning_curve, Colormap, Figure};

/// Initialize logging for binaries and tests that want the toolkit's
/// `log` records visible.
///
/// Installs an `env_logger` configured from `RUST_LOG`. Calling this more
/// than once, or alongside another global logger, is harmless — later
/// installations are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_init_is_reentrant() {
        init();
        init();
    }

    #[test]
    fn test_reexported_surface() {
        let y_true = array![1.0, 1.0, 0.0, 0.0];
        let y_pred = array![1.0, 0.0, 0.0, 0.0];
        let cm = ConfusionMatrix::from_labels(&y_true.view(), &y_pred.view(), None).unwrap();
        assert_eq!(cm.total(), 4);

        let err = EvalError::numerical("probe");
        assert_eq!(err.category(), "numerical");
    }
}
