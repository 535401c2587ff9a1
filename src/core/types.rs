//! Core data types for the evaluation toolkit.
//!
//! The toolkit standardizes on `f64` throughout: metric formulas are
//! accumulation-heavy and the reports promise four stable decimals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ground-truth class label or regression target.
pub type Label = f64;

/// Model output: a hard label, a probability, or a continuous prediction.
pub type Score = f64;

/// Class index into a probability matrix column.
pub type ClassIndex = usize;

/// Averaging strategy for precision-style metrics over multiple classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Average {
    /// Metrics for the positive class (label 1.0) only
    Binary,
    /// Global counts pooled over all classes
    Micro,
    /// Unweighted mean of per-class metrics
    Macro,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Binary => write!(f, "binary"),
            Average::Micro => write!(f, "micro"),
            Average::Macro => write!(f, "macro"),
        }
    }
}

/// Capitalize the first character of a dataset name for report headers.
///
/// Matches the original report header behavior for single-word names
/// ("test" becomes "Test").
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
