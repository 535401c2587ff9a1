//! Cross-validation plumbing for the learning-curve computation.
//!
//! [`KFold`] produces index splits; [`learning_curve`] drives repeated fits
//! of an [`Estimator`](crate::model::Estimator) over growing training
//! subsets under those splits. This is the delegated routine behind
//! [`plot_learning_curve`](crate::viz::plot_learning_curve) — the toolkit
//! orchestrates the fits but trains nothing itself.

pub mod kfold;
pub mod learning_curve;

pub use kfold::KFold;
pub use learning_curve::{learning_curve, LearningCurve};
