//! Collaborator contracts for already-trained models.
//!
//! The toolkit never trains anything of its own; it evaluates models that
//! live elsewhere. These traits are the seam: anything exposing hard-label
//! prediction (and, for classifiers, class probabilities) can be scored,
//! partitioned, and confidence-checked.

use crate::core::error::{EvalError, Result};
use crate::metrics::accuracy_score;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// A fitted model ready for prediction.
pub trait Model: Send + Sync {
    /// Predict a hard label (or continuous value) per feature row.
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;

    /// Predict per-class probabilities, one row per sample.
    ///
    /// Regressors and margin classifiers without a probability surface keep
    /// the default, which reports the capability as not implemented.
    fn predict_proba(&self, _x: &ArrayView2<f64>) -> Result<Array2<f64>> {
        Err(EvalError::not_implemented("Model::predict_proba"))
    }

    /// Score predictions against targets. Defaults to accuracy; regressors
    /// override with their own goodness-of-fit.
    fn score(&self, x: &ArrayView2<f64>, y: &ArrayView1<f64>) -> Result<f64> {
        let predictions = self.predict(x)?;
        accuracy_score(y, &predictions.view())
    }
}

/// An untrained estimator that can be fitted repeatedly on data subsets.
///
/// The learning-curve computation fits one fresh model per training subset;
/// `fit` therefore takes `&self` and returns the fitted model instead of
/// mutating the estimator in place.
pub trait Estimator: Send + Sync {
    /// Fit on the given rows and targets, returning the fitted model.
    fn fit(&self, x: &ArrayView2<f64>, y: &ArrayView1<f64>) -> Result<Box<dyn Model>>;
}
