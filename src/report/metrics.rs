//! The eleven-metric performance report.

use crate::core::error::Result;
use crate::core::types::{title_case, Average};
use crate::metrics::{
    accuracy_score, average_precision_score, f1_score, log_loss, mean_squared_error,
    precision_score, r2_score, recall_score, roc_auc_score,
};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Performance metrics of a binary classifier, in report order.
///
/// Hard-label metrics (accuracy, recall, the precisions, F1) are computed
/// from `y_pred`; threshold-free metrics (ROC-AUC, average precision, log
/// loss) and the regression-style metrics (R², MSE) from `y_score`. Keeping
/// the two inputs separate is deliberate: a single prediction vector cannot
/// serve both metric families at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Dataset name used in the report header (e.g. "train", "test")
    pub mode: String,
    /// Fraction of correct hard labels
    pub accuracy: f64,
    /// Binary recall
    pub recall: f64,
    /// Area under the ROC curve
    pub roc_auc: f64,
    /// Binary precision at the 0.5 operating point
    pub precision: f64,
    /// Average precision over the PR curve
    pub average_precision: f64,
    /// Micro-averaged precision
    pub precision_micro: f64,
    /// Macro-averaged precision
    pub precision_macro: f64,
    /// Binary F1
    pub f1: f64,
    /// Coefficient of determination against the scores
    pub r2: f64,
    /// Binary cross-entropy of the scores
    pub log_loss: f64,
    /// Mean squared error of the scores
    pub mse: f64,
}

impl MetricReport {
    /// Compute the full report.
    ///
    /// `y_pred` carries hard labels, `y_score` the matching probabilities
    /// (or continuous predictions); all three vectors share length N.
    pub fn compute(
        y_true: &ArrayView1<f64>,
        y_pred: &ArrayView1<f64>,
        y_score: &ArrayView1<f64>,
        mode: &str,
    ) -> Result<Self> {
        Ok(Self {
            mode: mode.to_string(),
            accuracy: accuracy_score(y_true, y_pred)?,
            recall: recall_score(y_true, y_pred)?,
            roc_auc: roc_auc_score(y_true, y_score)?,
            precision: precision_score(y_true, y_pred, Average::Binary)?,
            average_precision: average_precision_score(y_true, y_score)?,
            precision_micro: precision_score(y_true, y_pred, Average::Micro)?,
            precision_macro: precision_score(y_true, y_pred, Average::Macro)?,
            f1: f1_score(y_true, y_pred)?,
            r2: r2_score(y_true, y_score)?,
            log_loss: log_loss(y_true, y_score)?,
            mse: mean_squared_error(y_true, y_score)?,
        })
    }
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model performance on the {} dataset:", self.mode)?;
        writeln!(f, "   Metric             {}", title_case(&self.mode))?;
        writeln!(f, "accuracy........... {:8.4}", self.accuracy)?;
        writeln!(f, "recall............. {:8.4}", self.recall)?;
        writeln!(f, "auc................ {:8.4}", self.roc_auc)?;
        writeln!(f, "precision (p=0.5).. {:8.4}", self.precision)?;
        writeln!(f, "precision (avg).... {:8.4}", self.average_precision)?;
        writeln!(f, "precision (micro).. {:8.4}", self.precision_micro)?;
        writeln!(f, "precision (macro).. {:8.4}", self.precision_macro)?;
        writeln!(f, "f1................. {:8.4}", self.f1)?;
        writeln!(f, "r2................. {:8.4}", self.r2)?;
        writeln!(f, "logloss............ {:8.4}", self.log_loss)?;
        writeln!(f, "mse................ {:8.4}", self.mse)
    }
}

/// Compute the report and print it to standard output.
pub fn print_metrics(
    y_true: &ArrayView1<f64>,
    y_pred: &ArrayView1<f64>,
    y_score: &ArrayView1<f64>,
    mode: &str,
) -> Result<MetricReport> {
    let report = MetricReport::compute(y_true, y_pred, y_score, mode)?;
    println!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn fixture() -> (
        ndarray::Array1<f64>,
        ndarray::Array1<f64>,
        ndarray::Array1<f64>,
    ) {
        let y_true = array![1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let y_pred = array![1.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let y_score = array![0.9, 0.8, 0.4, 0.2, 0.1, 0.6];
        (y_true, y_pred, y_score)
    }

    #[test]
    fn test_compute_report() {
        let (y_true, y_pred, y_score) = fixture();
        let report =
            MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test").unwrap();

        assert_abs_diff_eq!(report.accuracy, 4.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.recall, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.precision, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.f1, 2.0 / 3.0, epsilon = 1e-12);
        // Scores rank one negative above one positive: 8 of 9 pairs correct.
        assert_abs_diff_eq!(report.roc_auc, 8.0 / 9.0, epsilon = 1e-12);
        assert!(report.log_loss > 0.0);
        assert!(report.mse > 0.0);
    }

    #[test]
    fn test_display_layout() {
        let (y_true, y_pred, y_score) = fixture();
        let report =
            MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test").unwrap();
        let text = report.to_string();

        assert!(text.starts_with("Model performance on the test dataset:\n"));
        assert!(text.contains("   Metric             Test\n"));
        assert!(text.contains("accuracy...........   0.6667\n"));
        assert!(text.contains("auc................   0.8889\n"));
        // Eleven metric lines plus the two header lines.
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_display_is_idempotent() {
        let (y_true, y_pred, y_score) = fixture();
        let first = MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test")
            .unwrap()
            .to_string();
        let second = MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test")
            .unwrap()
            .to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_rejects_length_mismatch() {
        let y_true = array![1.0, 0.0];
        let y_pred = array![1.0, 0.0, 1.0];
        let y_score = array![0.9, 0.1];
        let err = MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test")
            .unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }
}
