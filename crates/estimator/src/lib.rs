//! # estimator
//!
//! Client binding for the Target Encoder estimator of a remote analytics
//! service. Hyperparameters are validated locally; training and encoding run
//! on the service.

pub use estimator_facade::*;
