//! Binary confusion-matrix breakdown and console report.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use crate::metrics::ConfusionMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metrics derived from a 2×2 confusion matrix.
///
/// The corner convention follows the matrix layout (row = true label,
/// column = predicted label): `cm[0,0]` is the true negatives, `cm[1,1]`
/// the true positives, `cm[1,0]` the false negatives and `cm[0,1]` the
/// false positives. Zero denominators are rejected up front — the report
/// never carries NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrixReport {
    /// cm[0,0]
    pub true_negative: u64,
    /// cm[1,1]
    pub true_positive: u64,
    /// cm[1,0]
    pub false_negative: u64,
    /// cm[0,1]
    pub false_positive: u64,
    /// (tp + tn) / total
    pub accuracy: f64,
    /// tp / (tp + fp)
    pub precision: f64,
    /// tp / (tp + fn)
    pub recall: f64,
    /// (fp + fn) / total
    pub misclassification_rate: f64,
    /// 2tp / (2tp + fp + fn)
    pub f1: f64,
}

impl ConfusionMatrixReport {
    /// Derive the report from a 2×2 confusion matrix.
    pub fn from_matrix(cm: &ConfusionMatrix) -> Result<Self> {
        ensure!(
            cm.num_classes() == 2,
            EvalError::dimension_mismatch(
                "2x2 confusion matrix",
                format!("{}x{}", cm.num_classes(), cm.num_classes()),
            )
        );

        let counts = cm.counts();
        let true_negative = counts[[0, 0]];
        let true_positive = counts[[1, 1]];
        let false_negative = counts[[1, 0]];
        let false_positive = counts[[0, 1]];

        let total = true_negative + true_positive + false_negative + false_positive;
        ensure!(
            total > 0,
            EvalError::numerical("confusion matrix has no samples")
        );
        ensure!(
            true_positive + false_positive > 0,
            EvalError::numerical("precision is undefined: no sample was predicted positive")
        );
        ensure!(
            true_positive + false_negative > 0,
            EvalError::numerical("recall is undefined: no positive sample")
        );

        Ok(Self {
            true_negative,
            true_positive,
            false_negative,
            false_positive,
            accuracy: (true_positive + true_negative) as f64 / total as f64,
            precision: true_positive as f64 / (true_positive + false_positive) as f64,
            recall: true_positive as f64 / (true_positive + false_negative) as f64,
            misclassification_rate: (false_positive + false_negative) as f64 / total as f64,
            f1: 2.0 * true_positive as f64
                / (2 * true_positive + false_positive + false_negative) as f64,
        })
    }
}

impl fmt::Display for ConfusionMatrixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " accuracy................. {:.4}", self.accuracy)?;
        writeln!(f, " precision................ {:.4}", self.precision)?;
        writeln!(f, " recall................... {:.4}", self.recall)?;
        writeln!(
            f,
            " misclassification_rate... {:.4}",
            self.misclassification_rate
        )?;
        writeln!(f, " f1....................... {:.4}", self.f1)
    }
}

/// Group a count with thousands separators ("12,345").
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Aligned text rendering of the raw count matrix.
fn format_counts(cm: &ConfusionMatrix) -> String {
    let width = cm
        .counts()
        .iter()
        .map(|c| c.to_string().len())
        .max()
        .unwrap_or(1);
    cm.counts()
        .outer_iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|c| format!("{:>width$}", c)).collect();
            format!(" [{}]", cells.join("  "))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Print the full confusion-matrix report for a binary classification.
///
/// Emits the raw matrix, per-class true-label counts (row sums) and
/// predicted-label counts (column sums) against `labels`, the five derived
/// metrics at four decimals, and finally echoes the supplied
/// classification-report text verbatim. `labels` must have one entry per
/// matrix row.
pub fn print_confusion_matrix(
    cm: &ConfusionMatrix,
    classification_report: &str,
    labels: &[&str],
    mode: &str,
) -> Result<ConfusionMatrixReport> {
    if labels.len() != cm.num_classes() {
        return Err(EvalError::dimension_mismatch(
            format!("labels: {}", cm.num_classes()),
            format!("labels: {}", labels.len()),
        ));
    }

    let report = ConfusionMatrixReport::from_matrix(cm)?;

    println!("Confusion matrix of the {} data set:\n", mode);
    println!("confusion matrix:\n{}\n", format_counts(cm));

    println!("True labels:");
    for (&count, label) in cm.row_sums().iter().zip(labels.iter()) {
        println!("{}  {}", label, with_thousands(count));
    }
    println!();
    println!("Predicted labels:");
    for (&count, label) in cm.col_sums().iter().zip(labels.iter()) {
        println!("{}  {}", label, with_thousands(count));
    }

    println!("\n{}", report);
    println!("classification report:\n{}", classification_report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn sample_matrix() -> ConfusionMatrix {
        // tn=50, fp=5, fn=3, tp=42
        ConfusionMatrix::from_counts(array![[50u64, 5], [3, 42]]).unwrap()
    }

    #[test]
    fn test_derived_metrics() {
        let report = ConfusionMatrixReport::from_matrix(&sample_matrix()).unwrap();
        assert_eq!(report.true_negative, 50);
        assert_eq!(report.false_positive, 5);
        assert_eq!(report.false_negative, 3);
        assert_eq!(report.true_positive, 42);

        assert_abs_diff_eq!(report.accuracy, 0.92, epsilon = 1e-12);
        assert_abs_diff_eq!(report.precision, 42.0 / 47.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.recall, 42.0 / 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.misclassification_rate, 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(report.f1, 84.0 / 92.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display_four_decimals() {
        let text = ConfusionMatrixReport::from_matrix(&sample_matrix())
            .unwrap()
            .to_string();
        assert!(text.contains(" accuracy................. 0.9200"));
        assert!(text.contains(" precision................ 0.8936"));
        assert!(text.contains(" recall................... 0.9333"));
        assert!(text.contains(" misclassification_rate... 0.0800"));
        assert!(text.contains(" f1....................... 0.9130"));
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let err = print_confusion_matrix(&sample_matrix(), "", &["negative"], "test").unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }

    #[test]
    fn test_rejects_larger_matrix() {
        let cm = ConfusionMatrix::from_counts(array![[1u64, 0, 0], [0, 1, 0], [0, 0, 1]]).unwrap();
        let err = ConfusionMatrixReport::from_matrix(&cm).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }

    #[test]
    fn test_zero_denominator_is_an_error() {
        // Nothing predicted positive: precision denominator is empty.
        let cm = ConfusionMatrix::from_counts(array![[10u64, 0], [4, 0]]).unwrap();
        let err = ConfusionMatrixReport::from_matrix(&cm).unwrap_err();
        assert_eq!(err.category(), "numerical");
    }

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(7), "7");
        assert_eq!(with_thousands(1234), "1,234");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }
}
