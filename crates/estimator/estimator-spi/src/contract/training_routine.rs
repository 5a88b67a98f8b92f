//! Generic training routine contract.

use crate::error::Result;
use crate::model::{ModelHandle, Payload, TrainingRequest};

/// Base estimator machinery that submits a training job.
///
/// `extend` receives the outgoing payload after the routine has filled in the
/// generic fields and returns the payload actually sent.
pub trait TrainingRoutine: Send + Sync {
    fn train(
        &self,
        request: TrainingRequest,
        extend: &dyn Fn(Payload) -> Payload,
    ) -> Result<ModelHandle>;
}
