//! Estimator Core
//!
//! The Target Encoder binding, the generic model-builder training routine and
//! the blocking HTTP transport.

pub mod target_encoder;
pub mod trainer;

#[cfg(feature = "http")]
pub mod http;

pub use target_encoder::{extend_params, TargetEncoderEstimator, TrainArgs, TRANSFORM_ROUTE};
pub use trainer::{builder_payload, ModelBuilderTrainer};

#[cfg(feature = "http")]
pub use http::HttpTransport;
