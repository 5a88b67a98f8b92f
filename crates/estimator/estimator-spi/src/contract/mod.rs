//! Contract definitions for estimator bindings.
//!
//! This module contains the collaborator traits a binding is wired with.

mod training_routine;
mod transport;

pub use training_routine::TrainingRoutine;
pub use transport::{parse_frame, FrameResolver, Transport};
