//! Estimator Service Provider Interface
//!
//! Defines the collaborator traits, errors and wire types shared by bindings
//! to estimators that run on a remote analytics service.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{parse_frame, FrameResolver, TrainingRoutine, Transport};
pub use error::{EstimatorError, Result};
pub use model::{
    encode_segment, DatasetHandle, Endpoint, JobStatus, Method, ModelHandle, ParamValue, Payload,
    TrainingRequest,
};
