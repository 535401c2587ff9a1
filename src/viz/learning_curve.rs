//! Learning-curve plotting.

use crate::core::error::Result;
use crate::model::Estimator;
use crate::selection::{self, KFold, LearningCurve};
use crate::viz::chart::Chart;
use crate::viz::figure::{tint, Figure};
use image::Rgb;
use ndarray::{ArrayView1, ArrayView2};

const TRAIN_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const VALIDATION_COLOR: Rgb<u8> = Rgb([0, 128, 0]);
const BAND_ALPHA: f64 = 0.1;

const FIGURE_WIDTH: u32 = 640;
const FIGURE_HEIGHT: u32 = 480;

/// Fit `estimator` over growing training subsets and plot the resulting
/// learning curves.
///
/// Delegates the score computation to
/// [`selection::learning_curve`]; the plot shows, per training size, the
/// mean score ± one standard deviation as a shaded band, with the training
/// curve in red and the cross-validation curve in green. `y_limits` fixes
/// the score axis; by default it spans the data.
#[allow(clippy::too_many_arguments)]
pub fn plot_learning_curve(
    estimator: &dyn Estimator,
    title: &str,
    x: &ArrayView2<f64>,
    y: &ArrayView1<f64>,
    y_limits: Option<(f64, f64)>,
    cv: &KFold,
    parallelism: Option<usize>,
    train_fractions: &[f64],
) -> Result<Figure> {
    let curve = selection::learning_curve(estimator, x, y, cv, train_fractions, parallelism)?;
    render_learning_curve(&curve, title, y_limits)
}

/// Plot an already-computed learning curve.
pub fn render_learning_curve(
    curve: &LearningCurve,
    title: &str,
    y_limits: Option<(f64, f64)>,
) -> Result<Figure> {
    if curve.train_sizes.is_empty() {
        return Err(crate::core::error::EvalError::config(
            "learning curve has no training sizes",
        ));
    }
    let xs: Vec<f64> = curve.train_sizes.iter().map(|&s| s as f64).collect();

    let train_mean = curve.train_mean();
    let train_std = curve.train_std();
    let validation_mean = curve.validation_mean();
    let validation_std = curve.validation_std();

    let train_lower: Vec<f64> = band(&train_mean, &train_std, -1.0);
    let train_upper: Vec<f64> = band(&train_mean, &train_std, 1.0);
    let validation_lower: Vec<f64> = band(&validation_mean, &validation_std, -1.0);
    let validation_upper: Vec<f64> = band(&validation_mean, &validation_std, 1.0);

    let ylim = y_limits.unwrap_or_else(|| {
        let low = train_lower
            .iter()
            .chain(validation_lower.iter())
            .copied()
            .fold(f64::INFINITY, f64::min);
        let high = train_upper
            .iter()
            .chain(validation_upper.iter())
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        pad_limits(low, high)
    });
    let xlim = if xs.len() > 1 {
        (xs[0], xs[xs.len() - 1])
    } else {
        (xs[0] - 1.0, xs[0] + 1.0)
    };

    let mut chart = Chart::new(FIGURE_WIDTH, FIGURE_HEIGHT, xlim, ylim)?;

    let x_ticks = if xs.len() <= 8 {
        xs.clone()
    } else {
        Chart::ticks(xlim, 6)
    };
    let y_ticks = Chart::ticks(ylim, 6);
    chart.draw_grid(&x_ticks, &y_ticks);

    chart.fill_between(&xs, &train_lower, &train_upper, tint(TRAIN_COLOR, BAND_ALPHA));
    chart.fill_between(
        &xs,
        &validation_lower,
        &validation_upper,
        tint(VALIDATION_COLOR, BAND_ALPHA),
    );

    let train_ys = train_mean.to_vec();
    let validation_ys = validation_mean.to_vec();
    chart.polyline(&xs, &train_ys, TRAIN_COLOR);
    chart.markers(&xs, &train_ys, TRAIN_COLOR);
    chart.polyline(&xs, &validation_ys, VALIDATION_COLOR);
    chart.markers(&xs, &validation_ys, VALIDATION_COLOR);

    chart.draw_frame();
    chart.draw_x_ticks(&x_ticks);
    chart.draw_y_ticks(&y_ticks);
    chart.title(title);
    chart.x_label("Training examples");
    chart.y_label("Score");
    chart.legend(&[
        ("Training score", TRAIN_COLOR),
        ("Cross-validation score", VALIDATION_COLOR),
    ]);

    Ok(chart.into_figure())
}

/// Mean offset by `sign` standard deviations, per training size.
fn band(mean: &ndarray::Array1<f64>, std: &ndarray::Array1<f64>, sign: f64) -> Vec<f64> {
    mean.iter()
        .zip(std.iter())
        .map(|(&m, &s)| m + sign * s)
        .collect()
}

/// Widen degenerate score ranges so the axis always has extent.
fn pad_limits(low: f64, high: f64) -> (f64, f64) {
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if high - low < 1e-9 {
        (low - 0.05, high + 0.05)
    } else {
        let pad = (high - low) * 0.05;
        (low - pad, high + pad)
    }
}
