//! Confidence-threshold analysis of classifier predictions.
//!
//! A prediction is "confident" when its maximum class probability strictly
//! exceeds the chosen threshold. These helpers report how accurate a model
//! is when restricted to its confident predictions, and how much of the
//! data survives that restriction.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use crate::metrics::argmax_labels;
use crate::model::Model;
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a confidence-threshold analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    /// The threshold the analysis was run with
    pub min_confidence: f64,
    /// Accuracy over the confident predictions only
    pub conditional_accuracy: f64,
    /// Fraction of samples whose maximum class probability exceeds the
    /// threshold
    pub coverage: f64,
    /// Accuracy over all samples regardless of confidence
    pub baseline_accuracy: f64,
}

impl fmt::Display for ConfidenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "With a minimal confidence of {} we'd have {:.4} accuracy and {:.4} of the datapoints would",
            self.min_confidence, self.conditional_accuracy, self.coverage
        )?;
        write!(
            f,
            "be classified. The baseline is given as {:.4}",
            self.baseline_accuracy
        )
    }
}

/// Maximum of one probability row, computed over the fixed class width.
fn row_max(row: &ArrayView1<f64>) -> f64 {
    let mut max = row[0];
    for &value in row.iter().skip(1) {
        if value > max {
            max = value;
        }
    }
    max
}

/// Split samples four ways by confidence and correctness.
///
/// Returns (confident-correct, confident-incorrect, hesitant-correct,
/// hesitant-incorrect); the four counts always sum to the sample count.
fn confidence_counts(
    y_probas: &ArrayView2<f64>,
    correct: &[bool],
    min_confidence: f64,
) -> (usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0);
    for (row, &is_correct) in y_probas.outer_iter().zip(correct.iter()) {
        let confident = row_max(&row) > min_confidence;
        match (confident, is_correct) {
            (true, true) => counts.0 += 1,
            (true, false) => counts.1 += 1,
            (false, true) => counts.2 += 1,
            (false, false) => counts.3 += 1,
        }
    }
    counts
}

/// Shared core of the two confidence checks.
///
/// Errors when no sample at all clears the threshold: the conditional
/// accuracy would then divide by zero. A sample whose probabilities are all
/// exactly zero can never clear any threshold; feeding such degenerate rows
/// is the caller's responsibility.
fn build_report(
    y_probas: &ArrayView2<f64>,
    correct: &[bool],
    min_confidence: f64,
) -> Result<ConfidenceReport> {
    ensure!(
        (0.0..=1.0).contains(&min_confidence),
        EvalError::invalid_parameter(
            "min_confidence",
            format!("{}", min_confidence),
            "must lie in [0, 1]",
        )
    );
    ensure!(
        y_probas.ncols() > 0,
        EvalError::config("probability matrix has no class columns")
    );
    if y_probas.nrows() != correct.len() {
        return Err(EvalError::dimension_mismatch(
            format!("probabilities rows: {}", y_probas.nrows()),
            format!("labels: {}", correct.len()),
        ));
    }
    ensure!(
        !correct.is_empty(),
        EvalError::config("Empty input arrays")
    );

    let (confident_correct, confident_incorrect, _, _) =
        confidence_counts(y_probas, correct, min_confidence);
    let confident = confident_correct + confident_incorrect;
    log::debug!(
        "confidence split at {}: {} confident of {} samples",
        min_confidence,
        confident,
        correct.len()
    );
    if confident == 0 {
        return Err(EvalError::numerical(format!(
            "no sample clears the confidence threshold {}",
            min_confidence
        )));
    }

    let total = correct.len() as f64;
    let correct_total = correct.iter().filter(|&&c| c).count() as f64;

    Ok(ConfidenceReport {
        min_confidence,
        conditional_accuracy: confident_correct as f64 / confident as f64,
        coverage: confident as f64 / total,
        baseline_accuracy: correct_total / total,
    })
}

/// Report the accuracy of `model` when only confident predictions count.
///
/// Obtains class probabilities and hard predictions from the model, splits
/// the samples by correctness against `y_test`, and prints conditional
/// accuracy, coverage, and baseline accuracy at four decimals.
pub fn check_model_confidence(
    model: &dyn Model,
    min_confidence: f64,
    x_test: &ArrayView2<f64>,
    y_test: &ArrayView1<f64>,
) -> Result<ConfidenceReport> {
    let probabilities = model.predict_proba(x_test)?;
    let predictions = model.predict(x_test)?;
    if predictions.len() != y_test.len() {
        return Err(EvalError::dimension_mismatch(
            format!("predictions: {}", predictions.len()),
            format!("y_test: {}", y_test.len()),
        ));
    }

    let correct: Vec<bool> = predictions
        .iter()
        .zip(y_test.iter())
        .map(|(&p, &t)| p == t)
        .collect();

    let report = build_report(&probabilities.view(), &correct, min_confidence)?;
    println!("{}", report);
    Ok(report)
}

/// Same analysis from already-computed probability matrices.
///
/// Hard labels are derived from both matrices by per-row arg-max; `y_test`
/// may be one-hot or soft. Both matrices must share their shape.
pub fn check_prediction_confidence(
    min_confidence: f64,
    y_pred: &ArrayView2<f64>,
    y_test: &ArrayView2<f64>,
) -> Result<ConfidenceReport> {
    if y_pred.dim() != y_test.dim() {
        return Err(EvalError::dimension_mismatch(
            format!("y_pred: {:?}", y_pred.dim()),
            format!("y_test: {:?}", y_test.dim()),
        ));
    }

    let predicted = argmax_labels(y_pred)?;
    let truth = argmax_labels(y_test)?;
    let correct: Vec<bool> = predicted
        .iter()
        .zip(truth.iter())
        .map(|(&p, &t)| p == t)
        .collect();

    let report = build_report(y_pred, &correct, min_confidence)?;
    println!("{}", report);
    Ok(report)
}
