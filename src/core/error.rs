//! Error handling and error types for the evaluation toolkit.
//!
//! Every fallible operation in the crate returns [`Result`]. There is no
//! recovery or retry layer: a failed metric, plot, or partition call
//! propagates its error to the caller unmodified.

use std::io;
use thiserror::Error;

/// Main error type for the evaluation toolkit.
///
/// This enum covers the failure modes of metric computation, report
/// formatting, figure rendering, and the cross-validation plumbing.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dimension mismatch between labels, predictions, and feature rows
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Numerical computation errors (zero denominators, degenerate inputs)
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Out of bounds access
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Thread pool construction errors
    #[error("Threading error: {message}")]
    Threading { message: String },

    /// Not implemented functionality (e.g. probabilities on a regressor)
    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// CSV writing errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// Figure encoding errors
    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    /// Internal library errors (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results using EvalError
pub type Result<T> = std::result::Result<T, EvalError>;

/// Utility functions for error handling
impl EvalError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EvalError::Config {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        EvalError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        EvalError::Numerical {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        EvalError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        EvalError::IndexOutOfBounds { index, length }
    }

    /// Create a threading error
    pub fn threading<S: Into<String>>(message: S) -> Self {
        EvalError::Threading {
            message: message.into(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented<S: Into<String>>(feature: S) -> Self {
        EvalError::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        EvalError::Internal {
            message: message.into(),
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            EvalError::Config { .. } => "config",
            EvalError::DimensionMismatch { .. } => "dimension_mismatch",
            EvalError::Numerical { .. } => "numerical",
            EvalError::InvalidParameter { .. } => "invalid_parameter",
            EvalError::IndexOutOfBounds { .. } => "index_out_of_bounds",
            EvalError::Threading { .. } => "threading",
            EvalError::NotImplemented { .. } => "not_implemented",
            EvalError::IO { .. } => "io",
            EvalError::Json { .. } => "json",
            EvalError::Csv { .. } => "csv",
            EvalError::Image { .. } => "image",
            EvalError::Internal { .. } => "internal",
        }
    }
}

/// Convenience macro for input validation
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = EvalError::config("test configuration error");
        assert_eq!(err.category(), "config");

        let err = EvalError::numerical("division by zero in recall");
        assert_eq!(err.category(), "numerical");
    }

    #[test]
    fn test_parameter_errors() {
        let err = EvalError::invalid_parameter("min_confidence", "1.5", "must lie in [0, 1]");
        assert_eq!(err.category(), "invalid_parameter");
        let text = format!("{}", err);
        assert!(text.contains("min_confidence"));
        assert!(text.contains("must lie in [0, 1]"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = EvalError::dimension_mismatch("y_true: 100", "y_pred: 95");
        assert_eq!(err.category(), "dimension_mismatch");
        assert!(format!("{}", err).contains("expected y_true: 100"));
    }

    #[test]
    fn test_error_display() {
        let err = EvalError::config("test message");
        let error_string = format!("{}", err);
        assert!(error_string.contains("Configuration error"));
        assert!(error_string.contains("test message"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let eval_err: EvalError = io_err.into();
        assert!(matches!(eval_err, EvalError::IO { .. }));
        assert_eq!(eval_err.category(), "io");
    }

    #[test]
    fn test_ensure_macro() {
        fn guarded(n: usize) -> Result<usize> {
            ensure!(n > 0, EvalError::config("n must be positive"));
            Ok(n)
        }

        assert!(guarded(1).is_ok());
        assert!(guarded(0).is_err());
    }
}
