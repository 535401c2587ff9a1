//! Classification metrics for model evaluation.
//!
//! Accuracy, precision, recall, F1, ROC-AUC, log loss, average precision,
//! confusion matrices, ROC curve points, and the sklearn-style text
//! classification report.
//!
//! Binary metrics treat label `1.0` as the positive class. Probability
//! inputs are expected in `[0, 1]`; log loss clamps them away from the
//! endpoints before taking logarithms.

use crate::core::error::{EvalError, Result};
use crate::core::types::{Average, Label, Score};
use crate::ensure;
use crate::metrics::{class_index, validate_paired};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Numerical floor for probabilities passed to logarithms.
const LOG_LOSS_EPSILON: f64 = 1e-15;

/// Confusion matrix of label counts.
///
/// Row `i` holds the samples whose true class is `i`; column `j` holds the
/// samples predicted as class `j`. The sum of all entries equals the sample
/// count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: Array2<u64>,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from hard labels.
    ///
    /// `num_classes` fixes the matrix dimension; pass `None` to infer it as
    /// `max(label) + 1`. Labels outside `[0, num_classes)` are an error.
    pub fn from_labels(
        y_true: &ArrayView1<Label>,
        y_pred: &ArrayView1<Label>,
        num_classes: Option<usize>,
    ) -> Result<Self> {
        validate_paired(y_true, "y_true", y_pred, "y_pred")?;

        let inferred = match num_classes {
            Some(c) => c,
            None => {
                let mut max_class = 0usize;
                for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
                    max_class = max_class
                        .max(class_index(t, "y_true")?)
                        .max(class_index(p, "y_pred")?);
                }
                max_class + 1
            }
        };
        ensure!(
            inferred >= 2,
            EvalError::invalid_parameter(
                "num_classes",
                format!("{}", inferred),
                "a confusion matrix needs at least two classes",
            )
        );

        let mut counts = Array2::zeros((inferred, inferred));
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            let true_class = class_index(t, "y_true")?;
            let pred_class = class_index(p, "y_pred")?;
            if true_class >= inferred {
                return Err(EvalError::index_out_of_bounds(true_class, inferred));
            }
            if pred_class >= inferred {
                return Err(EvalError::index_out_of_bounds(pred_class, inferred));
            }
            counts[[true_class, pred_class]] += 1;
        }

        Ok(Self { counts })
    }

    /// Wrap an existing count matrix. The matrix must be square and at
    /// least 2×2.
    pub fn from_counts(counts: Array2<u64>) -> Result<Self> {
        if counts.nrows() != counts.ncols() {
            return Err(EvalError::dimension_mismatch(
                format!("square matrix, {} rows", counts.nrows()),
                format!("{} columns", counts.ncols()),
            ));
        }
        ensure!(
            counts.nrows() >= 2,
            EvalError::invalid_parameter(
                "counts",
                format!("{}x{}", counts.nrows(), counts.ncols()),
                "a confusion matrix needs at least two classes",
            )
        );
        Ok(Self { counts })
    }

    /// The raw count matrix.
    pub fn counts(&self) -> &Array2<u64> {
        &self.counts
    }

    /// Number of classes (matrix dimension).
    pub fn num_classes(&self) -> usize {
        self.counts.nrows()
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// Per-class true-label counts (row sums).
    pub fn row_sums(&self) -> Array1<u64> {
        self.counts.sum_axis(Axis(1))
    }

    /// Per-class predicted-label counts (column sums).
    pub fn col_sums(&self) -> Array1<u64> {
        self.counts.sum_axis(Axis(0))
    }

    /// Largest cell count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Row-normalized matrix: each cell divided by its true-class row sum.
    ///
    /// A row with no samples makes the normalization undefined and is an
    /// error.
    pub fn normalized(&self) -> Result<Array2<f64>> {
        let row_sums = self.row_sums();
        let mut out = Array2::zeros(self.counts.dim());
        for (i, row) in self.counts.outer_iter().enumerate() {
            let total = row_sums[i];
            if total == 0 {
                return Err(EvalError::numerical(format!(
                    "cannot normalize confusion matrix: row {} has no samples",
                    i
                )));
            }
            for (j, &count) in row.iter().enumerate() {
                out[[i, j]] = count as f64 / total as f64;
            }
        }
        Ok(out)
    }
}

/// Counts of true/false positives/negatives for the positive class 1.0.
fn binary_counts(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Label>) -> (u64, u64, u64, u64) {
    let mut tp = 0;
    let mut fp = 0;
    let mut tn = 0;
    let mut fn_ = 0;
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        match (t == 1.0, p == 1.0) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (false, false) => tn += 1,
            (true, false) => fn_ += 1,
        }
    }
    (tp, fp, tn, fn_)
}

/// Fraction of samples whose predicted hard label matches the true label.
pub fn accuracy_score(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Label>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(&t, &p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Precision under the given averaging strategy.
///
/// `Average::Binary` scores the positive class (label 1.0) and errors when
/// nothing was predicted positive. `Average::Micro` pools counts over all
/// classes. `Average::Macro` averages per-class precision, scoring a class
/// that was never predicted as 0.
pub fn precision_score(
    y_true: &ArrayView1<Label>,
    y_pred: &ArrayView1<Label>,
    average: Average,
) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;
    match average {
        Average::Binary => {
            let (tp, fp, _, _) = binary_counts(y_true, y_pred);
            if tp + fp == 0 {
                return Err(EvalError::numerical(
                    "binary precision is undefined: no sample was predicted positive",
                ));
            }
            Ok(tp as f64 / (tp + fp) as f64)
        }
        Average::Micro => {
            // Pooled over all classes, the denominator is the sample count.
            let cm = ConfusionMatrix::from_labels(y_true, y_pred, None)?;
            let tp: u64 = cm.counts().diag().iter().sum();
            Ok(tp as f64 / cm.total() as f64)
        }
        Average::Macro => {
            let cm = ConfusionMatrix::from_labels(y_true, y_pred, None)?;
            let col_sums = cm.col_sums();
            let mut precision_sum = 0.0;
            for class in 0..cm.num_classes() {
                let tp = cm.counts()[[class, class]];
                let predicted = col_sums[class];
                if predicted > 0 {
                    precision_sum += tp as f64 / predicted as f64;
                }
            }
            Ok(precision_sum / cm.num_classes() as f64)
        }
    }
}

/// Binary recall for the positive class (label 1.0).
pub fn recall_score(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Label>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;
    let (tp, _, _, fn_) = binary_counts(y_true, y_pred);
    if tp + fn_ == 0 {
        return Err(EvalError::numerical(
            "recall is undefined: no positive sample in y_true",
        ));
    }
    Ok(tp as f64 / (tp + fn_) as f64)
}

/// Binary F1 score, computed directly from counts as `2tp / (2tp + fp + fn)`.
pub fn f1_score(y_true: &ArrayView1<Label>, y_pred: &ArrayView1<Label>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_pred, "y_pred")?;
    let (tp, fp, _, fn_) = binary_counts(y_true, y_pred);
    let denominator = 2 * tp + fp + fn_;
    if denominator == 0 {
        return Err(EvalError::numerical(
            "f1 is undefined: no positive sample in y_true or y_pred",
        ));
    }
    Ok(2.0 * tp as f64 / denominator as f64)
}

/// ROC curve of a binary scorer: false/true positive rates per threshold.
///
/// Points are ordered from the origin towards (1, 1); tied scores collapse
/// into a single threshold step. `thresholds[0]` is positive infinity,
/// matching the origin point where nothing is predicted positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// False positive rate per threshold
    pub fpr: Vec<f64>,
    /// True positive rate per threshold
    pub tpr: Vec<f64>,
    /// Score thresholds, descending
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Area under the curve by trapezoidal integration.
    pub fn auc(&self) -> f64 {
        let mut area = 0.0;
        for window in 0..self.fpr.len().saturating_sub(1) {
            let width = self.fpr[window + 1] - self.fpr[window];
            let height = (self.tpr[window + 1] + self.tpr[window]) / 2.0;
            area += width * height;
        }
        area
    }
}

/// Compute the ROC curve for binary labels and continuous scores.
///
/// Errors when only one class is present, where the rates are undefined.
pub fn roc_curve(y_true: &ArrayView1<Label>, y_score: &ArrayView1<Score>) -> Result<RocCurve> {
    validate_paired(y_true, "y_true", y_score, "y_score")?;

    let positives = y_true.iter().filter(|&&t| t == 1.0).count() as f64;
    let negatives = y_true.len() as f64 - positives;
    if positives == 0.0 || negatives == 0.0 {
        return Err(EvalError::numerical(
            "ROC is undefined when only one class is present in y_true",
        ));
    }

    let mut pairs: Vec<(f64, f64)> = y_score
        .iter()
        .zip(y_true.iter())
        .map(|(&s, &t)| (s, t))
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    let mut tp = 0.0;
    let mut fp = 0.0;

    let mut i = 0;
    while i < pairs.len() {
        let threshold = pairs[i].0;
        // Consume the whole tie group before emitting a point.
        while i < pairs.len() && pairs[i].0 == threshold {
            if pairs[i].1 == 1.0 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }
        fpr.push(fp / negatives);
        tpr.push(tp / positives);
        thresholds.push(threshold);
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Area under the ROC curve for binary labels and continuous scores.
pub fn roc_auc_score(y_true: &ArrayView1<Label>, y_score: &ArrayView1<Score>) -> Result<f64> {
    Ok(roc_curve(y_true, y_score)?.auc())
}

/// Binary cross-entropy between labels and predicted probabilities.
///
/// Probabilities are clamped to `[1e-15, 1 - 1e-15]` before the logarithm.
pub fn log_loss(y_true: &ArrayView1<Label>, y_score: &ArrayView1<Score>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_score, "y_score")?;
    let total: f64 = y_true
        .iter()
        .zip(y_score.iter())
        .map(|(&t, &p)| {
            let clamped = p.clamp(LOG_LOSS_EPSILON, 1.0 - LOG_LOSS_EPSILON);
            -(t * clamped.ln() + (1.0 - t) * (1.0 - clamped).ln())
        })
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Average precision: the step-wise area under the precision-recall curve,
/// `AP = Σ (R_n − R_{n−1}) · P_n` over descending score thresholds.
pub fn average_precision_score(y_true: &ArrayView1<Label>, y_score: &ArrayView1<Score>) -> Result<f64> {
    validate_paired(y_true, "y_true", y_score, "y_score")?;

    let positives = y_true.iter().filter(|&&t| t == 1.0).count() as f64;
    if positives == 0.0 {
        return Err(EvalError::numerical(
            "average precision is undefined: no positive sample in y_true",
        ));
    }

    let mut pairs: Vec<(f64, f64)> = y_score
        .iter()
        .zip(y_true.iter())
        .map(|(&s, &t)| (s, t))
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut previous_recall = 0.0;
    let mut average_precision = 0.0;

    let mut i = 0;
    while i < pairs.len() {
        let threshold = pairs[i].0;
        while i < pairs.len() && pairs[i].0 == threshold {
            if pairs[i].1 == 1.0 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }
        let precision = tp / (tp + fp);
        let recall = tp / positives;
        average_precision += (recall - previous_recall) * precision;
        previous_recall = recall;
    }

    Ok(average_precision)
}

/// One-vs-rest ROC curve for every class of a probability matrix.
///
/// Column `c` of `y_probas` is used as the score for "class c vs rest".
/// A class absent from `y_true` makes its curve undefined and is an error.
pub fn one_vs_rest_roc_curves(
    y_true: &ArrayView1<Label>,
    y_probas: &ArrayView2<Score>,
) -> Result<Vec<RocCurve>> {
    if y_probas.nrows() != y_true.len() {
        return Err(EvalError::dimension_mismatch(
            format!("y_probas rows: {}", y_probas.nrows()),
            format!("y_true: {}", y_true.len()),
        ));
    }
    ensure!(
        y_probas.ncols() >= 2,
        EvalError::invalid_parameter(
            "y_probas",
            format!("{} columns", y_probas.ncols()),
            "a probability matrix needs at least two classes",
        )
    );

    let mut curves = Vec::with_capacity(y_probas.ncols());
    for class in 0..y_probas.ncols() {
        let rest: Array1<f64> = y_true
            .iter()
            .map(|&t| if t == class as f64 { 1.0 } else { 0.0 })
            .collect();
        let scores = y_probas.column(class);
        curves.push(roc_curve(&rest.view(), &scores)?);
    }
    Ok(curves)
}

/// Hard labels from a probability matrix: per-row arg-max over the fixed
/// class width. Ties resolve to the lowest class index.
pub fn argmax_labels(y_probas: &ArrayView2<Score>) -> Result<Array1<f64>> {
    ensure!(
        y_probas.ncols() > 0,
        EvalError::config("probability matrix has no class columns")
    );
    let labels = y_probas
        .outer_iter()
        .map(|row| {
            let mut best = 0usize;
            let mut best_value = row[0];
            for (class, &value) in row.iter().enumerate().skip(1) {
                if value > best_value {
                    best = class;
                    best_value = value;
                }
            }
            best as f64
        })
        .collect();
    Ok(labels)
}

/// Sklearn-style text classification report.
///
/// One row per class (precision, recall, F1, support), then macro and
/// weighted averages and the overall accuracy. `labels` names the classes
/// and fixes their count; per-class metrics with an empty denominator are
/// reported as 0.00.
pub fn classification_report(
    y_true: &ArrayView1<Label>,
    y_pred: &ArrayView1<Label>,
    labels: &[&str],
) -> Result<String> {
    let cm = ConfusionMatrix::from_labels(y_true, y_pred, Some(labels.len()))?;
    let row_sums = cm.row_sums();
    let col_sums = cm.col_sums();
    let total = cm.total();

    let mut report = String::new();
    report.push_str(&format!(
        "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
        "", "precision", "recall", "f1-score", "support"
    ));
    report.push_str(&"-".repeat(56));
    report.push('\n');

    let mut macro_precision = 0.0;
    let mut macro_recall = 0.0;
    let mut macro_f1 = 0.0;
    let mut weighted_precision = 0.0;
    let mut weighted_recall = 0.0;
    let mut weighted_f1 = 0.0;

    for (class, name) in labels.iter().enumerate() {
        let tp = cm.counts()[[class, class]] as f64;
        let support = row_sums[class] as f64;
        let predicted = col_sums[class] as f64;

        let precision = if predicted > 0.0 { tp / predicted } else { 0.0 };
        let recall = if support > 0.0 { tp / support } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        macro_precision += precision;
        macro_recall += recall;
        macro_f1 += f1;
        weighted_precision += precision * support;
        weighted_recall += recall * support;
        weighted_f1 += f1 * support;

        report.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            name, precision, recall, f1, support as u64
        ));
    }

    let class_count = labels.len() as f64;
    report.push_str(&"-".repeat(56));
    report.push('\n');
    report.push_str(&format!(
        "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
        "macro avg",
        macro_precision / class_count,
        macro_recall / class_count,
        macro_f1 / class_count,
        total
    ));
    report.push_str(&format!(
        "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
        "weighted avg",
        weighted_precision / total as f64,
        weighted_recall / total as f64,
        weighted_f1 / total as f64,
        total
    ));

    let diagonal: u64 = cm.counts().diag().iter().sum();
    report.push_str(&format!(
        "\nAccuracy: {:.4}\n",
        diagonal as f64 / total as f64
    ));

    Ok(report)
}
