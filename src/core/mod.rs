//! Core infrastructure: error handling and fundamental types.

pub mod error;
pub mod types;

pub use error::{EvalError, Result};
pub use types::{Average, ClassIndex, Label, Score};
