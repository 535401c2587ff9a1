//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use evalkit_rust::{Estimator, Model, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Classifier that thresholds the first feature at the mean seen in `fit`.
pub struct MidpointEstimator;

/// The fitted counterpart of [`MidpointEstimator`].
pub struct MidpointModel {
    threshold: f64,
}

impl Model for MidpointModel {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        Ok(x.column(0)
            .iter()
            .map(|&v| if v > self.threshold { 1.0 } else { 0.0 })
            .collect())
    }

    fn predict_proba(&self, x: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let mut probabilities = Array2::zeros((x.nrows(), 2));
        for (i, &v) in x.column(0).iter().enumerate() {
            let positive = 1.0 / (1.0 + (-(v - self.threshold)).exp());
            probabilities[[i, 0]] = 1.0 - positive;
            probabilities[[i, 1]] = positive;
        }
        Ok(probabilities)
    }
}

impl Estimator for MidpointEstimator {
    fn fit(&self, x: &ArrayView2<f64>, _y: &ArrayView1<f64>) -> Result<Box<dyn Model>> {
        let column = x.column(0);
        let threshold = column.sum() / column.len() as f64;
        Ok(Box::new(MidpointModel { threshold }))
    }
}

/// Linearly separable binary data: feature `i`, positive in the upper half.
pub fn synthetic_binary(n: usize) -> (Array2<f64>, Array1<f64>) {
    let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { i as f64 } else { 1.0 });
    let y = Array1::from_shape_fn(n, |i| if i >= n / 2 { 1.0 } else { 0.0 });
    (x, y)
}
