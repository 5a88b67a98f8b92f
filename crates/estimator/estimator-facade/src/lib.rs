//! Estimator Facade
//!
//! Unified re-exports for the estimator module.
//!
//! This facade provides a single entry point for all estimator functionality:
//! - `estimator_spi` - Collaborator traits, errors and wire types
//! - `estimator_api` - Parameter schema and configuration types
//! - `estimator_core` - Target Encoder binding, trainer and HTTP transport
//!
//! # Example
//!
//! ```rust,ignore
//! use estimator_facade::{ConnectionConfig, DatasetHandle, TargetEncoderEstimator, TrainArgs, TransformOptions};
//!
//! let mut te = TargetEncoderEstimator::connect(ConnectionConfig::default())?;
//! te.train(
//!     TrainArgs::new()
//!         .encoded_columns(&["home.dest", "cabin"])
//!         .target_column("survived")
//!         .training_frame("titanic.hex"),
//! )?;
//! let encoded = te.transform(&DatasetHandle::new("titanic.hex"), &TransformOptions::default())?;
//! ```

// Re-export everything from SPI
pub use estimator_spi::*;

// Re-export everything from API
pub use estimator_api::*;

// Re-export everything from Core
pub use estimator_core::*;
