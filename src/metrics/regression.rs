//! Regression metrics for model evaluation.

use crate::core::error::{EvalError, Result};
use crate::core::types::{Label, Score};
use crate::metrics::validate_paired;
use ndarray::ArrayView1;

/// Mean squared error between targets and predictions.
pub fn mean_squared_error(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Score>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Errors when the targets are constant, where the total sum of squares is
/// zero and the score is undefined.
pub fn r2_score(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Score>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;

    let mean = y_true.sum() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean) * (t - mean)).sum();
    if ss_tot == 0.0 {
        return Err(EvalError::numerical(
            "r2 is undefined: y_true is constant",
        ));
    }

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    Ok(1.0 - ss_res / ss_tot)
}
