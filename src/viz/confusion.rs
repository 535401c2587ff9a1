//! Confusion-matrix heat-map rendering.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use crate::metrics::ConfusionMatrix;
use crate::viz::colormap::Colormap;
use crate::viz::figure::{text_height, text_width, Figure, BLACK, WHITE};
use image::Rgb;
use ndarray::Array2;

/// Pixel size of one heat-map cell.
const CELL_SIZE: u32 = 84;
/// Space left of the grid for class labels and the axis label.
const MARGIN_LEFT: u32 = 96;
/// Space above the grid for the title.
const MARGIN_TOP: u32 = 52;
/// Space right of the grid.
const MARGIN_RIGHT: u32 = 24;
/// Space below the grid for class labels and the axis label.
const MARGIN_BOTTOM: u32 = 74;

/// Builder for confusion-matrix heat-maps.
///
/// Renders a C×C grid with class tick labels on both axes and one
/// annotation per cell: the raw count, or the row-normalized fraction at
/// two decimals when `normalize` is set.
///
/// # Examples
///
/// ```rust,no_run
/// use evalkit_rust::metrics::ConfusionMatrix;
/// use evalkit_rust::viz::ConfusionMatrixPlot;
/// use ndarray::array;
///
/// # fn example() -> evalkit_rust::Result<()> {
/// let cm = ConfusionMatrix::from_counts(array![[50u64, 5], [3, 42]])?;
/// let figure = ConfusionMatrixPlot::new(&cm)
///     .classes(&["negative", "positive"])
///     .normalize(true)
///     .render()?;
/// figure.save("confusion.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfusionMatrixPlot<'a> {
    cm: &'a ConfusionMatrix,
    classes: Option<Vec<String>>,
    normalize: bool,
    title: String,
    colormap: Colormap,
}

impl<'a> ConfusionMatrixPlot<'a> {
    /// Start a plot for the given matrix.
    pub fn new(cm: &'a ConfusionMatrix) -> Self {
        Self {
            cm,
            classes: None,
            normalize: false,
            title: "Confusion matrix".to_string(),
            colormap: Colormap::default(),
        }
    }

    /// Set the class tick labels (defaults to the class indices).
    pub fn classes(mut self, classes: &[&str]) -> Self {
        self.classes = Some(classes.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Annotate cells with row-normalized fractions instead of counts.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the figure title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the heat-map colormap.
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Render the heat-map.
    pub fn render(&self) -> Result<Figure> {
        let n = self.cm.num_classes();
        let classes: Vec<String> = match &self.classes {
            Some(classes) => {
                ensure!(
                    classes.len() == n,
                    EvalError::dimension_mismatch(
                        format!("classes: {}", n),
                        format!("classes: {}", classes.len()),
                    )
                );
                classes.clone()
            }
            None => (0..n).map(|i| i.to_string()).collect(),
        };

        let values: Array2<f64> = if self.normalize {
            self.cm.normalized()?
        } else {
            self.cm.counts().map(|&c| c as f64)
        };
        let max = values.iter().copied().fold(0.0f64, f64::max);
        log::debug!(
            "rendering {} confusion matrix heat-map, {} classes",
            if self.normalize { "normalized" } else { "raw" },
            n
        );

        let grid = CELL_SIZE * n as u32;
        let width = MARGIN_LEFT + grid + MARGIN_RIGHT;
        let height = MARGIN_TOP + grid + MARGIN_BOTTOM;
        let mut fig = Figure::new(width, height);

        for i in 0..n {
            for j in 0..n {
                let value = values[[i, j]];
                let x = (MARGIN_LEFT + j as u32 * CELL_SIZE) as i32;
                let y = (MARGIN_TOP + i as u32 * CELL_SIZE) as i32;
                let shade = self
                    .colormap
                    .sample(if max > 0.0 { value / max } else { 0.0 });
                fig.fill_rect(x, y, CELL_SIZE, CELL_SIZE, shade);

                let label = cell_label(value, self.normalize);
                let label_width = text_width(&label, 1);
                fig.draw_text(
                    x + (CELL_SIZE / 2) as i32 - label_width as i32 / 2,
                    y + (CELL_SIZE / 2) as i32 - text_height(1) as i32 / 2,
                    &label,
                    1,
                    annotation_color(value, max),
                );
            }
        }

        // Class tick labels along both axes.
        for (j, class) in classes.iter().enumerate() {
            let label_width = text_width(class, 1);
            fig.draw_text(
                (MARGIN_LEFT + j as u32 * CELL_SIZE + CELL_SIZE / 2) as i32
                    - label_width as i32 / 2,
                (MARGIN_TOP + grid + 8) as i32,
                class,
                1,
                BLACK,
            );
        }
        for (i, class) in classes.iter().enumerate() {
            let label_width = text_width(class, 1);
            fig.draw_text(
                MARGIN_LEFT as i32 - 8 - label_width as i32,
                (MARGIN_TOP + i as u32 * CELL_SIZE + CELL_SIZE / 2) as i32
                    - text_height(1) as i32 / 2,
                class,
                1,
                BLACK,
            );
        }

        // Title and axis labels.
        let title_width = text_width(&self.title, 2);
        fig.draw_text(
            (MARGIN_LEFT + grid / 2) as i32 - title_width as i32 / 2,
            (MARGIN_TOP / 2) as i32 - text_height(2) as i32 / 2,
            &self.title,
            2,
            BLACK,
        );
        let x_label = "Predicted label";
        let x_label_width = text_width(x_label, 1);
        fig.draw_text(
            (MARGIN_LEFT + grid / 2) as i32 - x_label_width as i32 / 2,
            (height - 22) as i32,
            x_label,
            1,
            BLACK,
        );
        let y_label = "True label";
        let y_label_width = text_width(y_label, 1);
        fig.draw_text_rot90(
            8,
            (MARGIN_TOP + grid / 2) as i32 - y_label_width as i32 / 2,
            y_label,
            1,
            BLACK,
        );

        Ok(fig)
    }
}

/// Render a confusion matrix with default title and colormap.
pub fn plot_confusion_matrix(
    cm: &ConfusionMatrix,
    classes: &[&str],
    normalize: bool,
) -> Result<Figure> {
    ConfusionMatrixPlot::new(cm)
        .classes(classes)
        .normalize(normalize)
        .render()
}

/// Cell annotation text: counts bare, normalized fractions at two decimals.
fn cell_label(value: f64, normalize: bool) -> String {
    if normalize {
        format!("{:.2}", value)
    } else {
        format!("{}", value as u64)
    }
}

/// White text on dark cells, black on light ones. The switch point is half
/// the matrix maximum, a readability heuristic rather than a numeric
/// contract.
fn annotation_color(value: f64, max: f64) -> Rgb<u8> {
    if value > max / 2.0 {
        WHITE
    } else {
        BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix() -> ConfusionMatrix {
        ConfusionMatrix::from_counts(array![[8u64, 2], [5, 15]]).unwrap()
    }

    #[test]
    fn test_cell_label_formats() {
        assert_eq!(cell_label(42.0, false), "42");
        assert_eq!(cell_label(0.5, true), "0.50");
        assert_eq!(cell_label(0.8333, true), "0.83");
    }

    #[test]
    fn test_annotation_color_threshold() {
        assert_eq!(annotation_color(9.0, 16.0), WHITE);
        assert_eq!(annotation_color(8.0, 16.0), BLACK);
        assert_eq!(annotation_color(2.0, 16.0), BLACK);
    }

    #[test]
    fn test_render_dimensions() {
        let cm = matrix();
        let fig = ConfusionMatrixPlot::new(&cm).render().unwrap();
        assert_eq!(
            fig.width(),
            MARGIN_LEFT + 2 * CELL_SIZE + MARGIN_RIGHT
        );
        assert_eq!(
            fig.height(),
            MARGIN_TOP + 2 * CELL_SIZE + MARGIN_BOTTOM
        );
    }

    #[test]
    fn test_render_rejects_class_mismatch() {
        let cm = matrix();
        let err = plot_confusion_matrix(&cm, &["only one"], false).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }

    #[test]
    fn test_render_is_idempotent() {
        let cm = matrix();
        let first = plot_confusion_matrix(&cm, &["a", "b"], true).unwrap();
        let second = plot_confusion_matrix(&cm, &["a", "b"], true).unwrap();
        assert_eq!(first.image().as_raw(), second.image().as_raw());
    }

    #[test]
    fn test_normalized_render_divides_by_row_sums() {
        // Row sums [10, 20]: row 0 cells /10, row 1 cells /20.
        let cm = matrix();
        let normalized = cm.normalized().unwrap();
        assert_eq!(cell_label(normalized[[0, 0]], true), "0.80");
        assert_eq!(cell_label(normalized[[1, 1]], true), "0.75");
        let fig = plot_confusion_matrix(&cm, &["a", "b"], true).unwrap();
        assert!(fig.width() > 0);
    }
}
