//! Figure rendering for evaluation results.
//!
//! Every plot operation returns an explicit [`Figure`] — an off-screen RGB
//! raster the caller saves, inspects, or drops. There is no shared
//! "current figure" state; two calls with the same inputs produce
//! pixel-identical figures.
//!
//! # Examples
//!
//! ```rust,no_run
//! use evalkit_rust::metrics::ConfusionMatrix;
//! use evalkit_rust::viz::plot_confusion_matrix;
//! use ndarray::array;
//!
//! # fn example() -> evalkit_rust::Result<()> {
//! let cm = ConfusionMatrix::from_counts(array![[50u64, 5], [3, 42]])?;
//! let figure = plot_confusion_matrix(&cm, &["negative", "positive"], false)?;
//! figure.save("confusion.png")?;
//! # Ok(())
//! # }
//! ```

mod chart;
pub mod colormap;
pub mod confusion;
pub mod figure;
mod font;
pub mod learning_curve;
pub mod roc;

pub use colormap::Colormap;
pub use confusion::{plot_confusion_matrix, ConfusionMatrixPlot};
pub use figure::Figure;
pub use learning_curve::{plot_learning_curve, render_learning_curve};
pub use roc::auc_plot;
