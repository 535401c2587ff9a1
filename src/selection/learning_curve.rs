//! Learning-curve computation: repeated fits over growing training subsets.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use crate::model::Estimator;
use crate::selection::KFold;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

/// Scores gathered by [`learning_curve`].
///
/// Both score matrices have one row per training-size fraction and one
/// column per cross-validation fold.
#[derive(Debug, Clone)]
pub struct LearningCurve {
    /// Absolute training-subset sizes, one per fraction (taken from the
    /// first fold's training split)
    pub train_sizes: Vec<usize>,
    /// Scores on the training subset itself
    pub train_scores: Array2<f64>,
    /// Scores on the held-out fold
    pub validation_scores: Array2<f64>,
}

impl LearningCurve {
    /// Per-fraction mean of the training scores.
    pub fn train_mean(&self) -> Array1<f64> {
        self.train_scores.mean_axis(Axis(1)).unwrap_or_default()
    }

    /// Per-fraction standard deviation of the training scores.
    pub fn train_std(&self) -> Array1<f64> {
        self.train_scores.std_axis(Axis(1), 0.0)
    }

    /// Per-fraction mean of the held-out scores.
    pub fn validation_mean(&self) -> Array1<f64> {
        self.validation_scores
            .mean_axis(Axis(1))
            .unwrap_or_default()
    }

    /// Per-fraction standard deviation of the held-out scores.
    pub fn validation_std(&self) -> Array1<f64> {
        self.validation_scores.std_axis(Axis(1), 0.0)
    }
}

/// Fit `estimator` on growing subsets of the training data under
/// cross-validation and score each fit on its subset and its held-out fold.
///
/// For every fold and every fraction `f` in `train_fractions` (each in
/// (0, 1]), the estimator is fitted on the first `⌈f · |train|⌉` rows of
/// the fold's training split. Fits run on a dedicated worker pool sized by
/// `parallelism` (default: all available cores).
///
/// The estimator is the caller's: this routine only orchestrates fits, it
/// does not train models of its own.
pub fn learning_curve(
    estimator: &dyn Estimator,
    x: &ArrayView2<f64>,
    y: &ArrayView1<f64>,
    cv: &KFold,
    train_fractions: &[f64],
    parallelism: Option<usize>,
) -> Result<LearningCurve> {
    if x.nrows() != y.len() {
        return Err(EvalError::dimension_mismatch(
            format!("x rows: {}", x.nrows()),
            format!("y: {}", y.len()),
        ));
    }
    ensure!(
        !train_fractions.is_empty(),
        EvalError::config("train_fractions must not be empty")
    );
    for &fraction in train_fractions {
        ensure!(
            fraction > 0.0 && fraction <= 1.0,
            EvalError::invalid_parameter(
                "train_fractions",
                format!("{}", fraction),
                "fractions must lie in (0, 1]",
            )
        );
    }

    let folds = cv.split(x.nrows())?;
    let n_folds = folds.len();
    let n_fractions = train_fractions.len();

    let workers = parallelism.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| EvalError::threading(e.to_string()))?;

    log::debug!(
        "learning curve: {} fractions x {} folds on {} workers",
        n_fractions,
        n_folds,
        workers
    );

    let jobs: Vec<(usize, usize)> = (0..n_fractions)
        .flat_map(|fraction_idx| (0..n_folds).map(move |fold_idx| (fraction_idx, fold_idx)))
        .collect();

    let scores: Vec<Result<(usize, usize, f64, f64)>> = pool.install(|| {
        jobs.par_iter()
            .map(|&(fraction_idx, fold_idx)| {
                let (train_indices, test_indices) = &folds[fold_idx];
                let subset_len = subset_size(train_fractions[fraction_idx], train_indices.len());
                let subset = &train_indices[..subset_len];

                let x_subset = x.select(Axis(0), subset);
                let y_subset = y.select(Axis(0), subset);
                let x_test = x.select(Axis(0), test_indices);
                let y_test = y.select(Axis(0), test_indices);

                let model = estimator.fit(&x_subset.view(), &y_subset.view())?;
                let train_score = model.score(&x_subset.view(), &y_subset.view())?;
                let validation_score = model.score(&x_test.view(), &y_test.view())?;
                Ok((fraction_idx, fold_idx, train_score, validation_score))
            })
            .collect()
    });

    let mut train_scores = Array2::zeros((n_fractions, n_folds));
    let mut validation_scores = Array2::zeros((n_fractions, n_folds));
    for entry in scores {
        let (fraction_idx, fold_idx, train_score, validation_score) = entry?;
        train_scores[[fraction_idx, fold_idx]] = train_score;
        validation_scores[[fraction_idx, fold_idx]] = validation_score;
    }

    let first_train_len = folds[0].0.len();
    let train_sizes = train_fractions
        .iter()
        .map(|&fraction| subset_size(fraction, first_train_len))
        .collect();

    Ok(LearningCurve {
        train_sizes,
        train_scores,
        validation_scores,
    })
}

/// Subset length for a fraction of a training split, at least one row.
fn subset_size(fraction: f64, train_len: usize) -> usize {
    ((fraction * train_len as f64).ceil() as usize).clamp(1, train_len)
}
