//! Estimator API
//!
//! Parameter schema, validated parameter storage and configuration types for
//! the Target Encoder binding.

pub mod config;
pub mod parameter_set;
pub mod schema;

// Re-export SPI types
pub use estimator_spi::{DatasetHandle, EstimatorError, ParamValue, Payload, Result};

pub use config::{
    ConnectionConfig, ConnectionConfigBuilder, TargetEncoderParams, TargetEncoderParamsBuilder,
    TransformOptions, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS, NOISE_SERVER_DEFAULT,
    SEED_SERVER_DEFAULT,
};
pub use parameter_set::ParameterSet;
pub use schema::{defaults, DataLeakageHandling, ParamKind, ParamName};
