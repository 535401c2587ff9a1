//! Per-class ROC curve plotting.

use crate::core::error::Result;
use crate::metrics::one_vs_rest_roc_curves;
use crate::viz::chart::Chart;
use crate::viz::figure::Figure;
use image::Rgb;
use ndarray::{ArrayView1, ArrayView2};

const FIGURE_WIDTH: u32 = 640;
const FIGURE_HEIGHT: u32 = 480;

/// Line colors cycled across classes.
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

const CHANCE_GREY: Rgb<u8> = Rgb([120, 120, 120]);

/// Plot one-vs-rest ROC curves for every class of a probability matrix.
///
/// `y_probas` holds one probability row per sample; column `c` scores
/// "class c vs rest" against the true labels. The legend carries each
/// class's area under its curve; the grey diagonal marks chance level.
pub fn auc_plot(
    title: &str,
    y_probas: &ArrayView2<f64>,
    y_true: &ArrayView1<f64>,
) -> Result<Figure> {
    let curves = one_vs_rest_roc_curves(y_true, y_probas)?;

    let mut chart = Chart::new(FIGURE_WIDTH, FIGURE_HEIGHT, (0.0, 1.0), (0.0, 1.0))?;
    let ticks = Chart::ticks((0.0, 1.0), 6);
    chart.draw_grid(&ticks, &ticks);
    chart.dashed_line((0.0, 0.0), (1.0, 1.0), CHANCE_GREY);

    let labels: Vec<String> = curves
        .iter()
        .enumerate()
        .map(|(class, curve)| format!("class {} (area = {:.2})", class, curve.auc()))
        .collect();

    for (class, curve) in curves.iter().enumerate() {
        let color = PALETTE[class % PALETTE.len()];
        chart.polyline(&curve.fpr, &curve.tpr, color);
    }

    chart.draw_frame();
    chart.draw_x_ticks(&ticks);
    chart.draw_y_ticks(&ticks);
    chart.title(title);
    chart.x_label("False Positive Rate");
    chart.y_label("True Positive Rate");

    let entries: Vec<(&str, Rgb<u8>)> = labels
        .iter()
        .enumerate()
        .map(|(class, label)| (label.as_str(), PALETTE[class % PALETTE.len()]))
        .collect();
    chart.legend(&entries);

    Ok(chart.into_figure())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn fixture() -> (ndarray::Array1<f64>, ndarray::Array2<f64>) {
        let y_true = array![0.0, 1.0, 2.0, 1.0, 0.0, 2.0];
        let y_probas = array![
            [0.8, 0.1, 0.1],
            [0.1, 0.7, 0.2],
            [0.2, 0.2, 0.6],
            [0.3, 0.5, 0.2],
            [0.6, 0.3, 0.1],
            [0.1, 0.3, 0.6],
        ];
        (y_true, y_probas)
    }

    #[test]
    fn test_auc_plot_dimensions() {
        let (y_true, y_probas) = fixture();
        let fig = auc_plot("ROC curves", &y_probas.view(), &y_true.view()).unwrap();
        assert_eq!(fig.width(), FIGURE_WIDTH);
        assert_eq!(fig.height(), FIGURE_HEIGHT);
    }

    #[test]
    fn test_auc_plot_is_idempotent() {
        let (y_true, y_probas) = fixture();
        let first = auc_plot("ROC", &y_probas.view(), &y_true.view()).unwrap();
        let second = auc_plot("ROC", &y_probas.view(), &y_true.view()).unwrap();
        assert_eq!(first.image().as_raw(), second.image().as_raw());
    }

    #[test]
    fn test_auc_plot_rejects_missing_class() {
        // Class 2 never occurs: its one-vs-rest curve is undefined.
        let y_true = array![0.0, 1.0, 0.0, 1.0];
        let y_probas = array![
            [0.8, 0.1, 0.1],
            [0.1, 0.7, 0.2],
            [0.6, 0.3, 0.1],
            [0.2, 0.6, 0.2],
        ];
        let err = auc_plot("ROC", &y_probas.view(), &y_true.view()).unwrap_err();
        assert_eq!(err.category(), "numerical");
    }
}
