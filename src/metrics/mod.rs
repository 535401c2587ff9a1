//! Evaluation metrics for trained models.
//!
//! This module provides the metric formulas the reporting and plotting
//! layers are built on: classification metrics (accuracy, precision,
//! recall, F1, ROC-AUC, log loss, average precision, confusion matrices,
//! ROC curves) and regression metrics (MSE, R²).
//!
//! All functions are stateless single-pass computations over `ndarray`
//! views. Inputs are validated up front; degenerate denominators surface
//! as [`EvalError::Numerical`](crate::core::error::EvalError) instead of
//! NaN.
//!
//! # Examples
//!
//! ```rust,no_run
//! use evalkit_rust::metrics::{accuracy_score, roc_auc_score};
//! use ndarray::Array1;
//!
//! # fn example() -> evalkit_rust::Result<()> {
//! let y_true = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0]);
//! let y_pred = Array1::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
//! let y_score = Array1::from_vec(vec![0.9, 0.2, 0.4, 0.1]);
//!
//! println!("accuracy: {:.4}", accuracy_score(&y_true.view(), &y_pred.view())?);
//! println!("auc:      {:.4}", roc_auc_score(&y_true.view(), &y_score.view())?);
//! # Ok(())
//! # }
//! ```

pub mod classification;
pub mod regression;

pub use classification::{
    accuracy_score, argmax_labels, average_precision_score, classification_report, f1_score,
    log_loss, one_vs_rest_roc_curves, precision_score, recall_score, roc_auc_score, roc_curve,
    ConfusionMatrix, RocCurve,
};

pub use regression::{mean_squared_error, r2_score};

use crate::core::error::{EvalError, Result};
use ndarray::ArrayView1;

/// Validate that two paired vectors are non-empty and of equal length.
pub(crate) fn validate_paired(
    left: &ArrayView1<f64>,
    left_name: &str,
    right: &ArrayView1<f64>,
    right_name: &str,
) -> Result<()> {
    if left.len() != right.len() {
        return Err(EvalError::dimension_mismatch(
            format!("{}: {}", left_name, left.len()),
            format!("{}: {}", right_name, right.len()),
        ));
    }
    if left.is_empty() {
        return Err(EvalError::config("Empty input arrays"));
    }
    Ok(())
}

/// Convert a label to a class index, rejecting negatives and non-finite values.
pub(crate) fn class_index(label: f64, name: &str) -> Result<usize> {
    if !label.is_finite() || label < 0.0 {
        return Err(EvalError::invalid_parameter(
            name,
            format!("{}", label),
            "class labels must be finite and non-negative",
        ));
    }
    Ok(label.round() as usize)
}
