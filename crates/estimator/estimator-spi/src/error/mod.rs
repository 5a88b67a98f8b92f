//! Error types for estimator bindings.

mod estimator_error;

pub use estimator_error::{EstimatorError, Result};
