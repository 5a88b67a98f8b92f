//! Training submission types.

use serde::{Deserialize, Serialize};

use super::{DatasetHandle, Payload};

/// Inputs handed to a generic training routine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    /// Algorithm name used to address the model builder
    pub algo: String,
    /// Feature columns
    pub x: Option<Vec<String>>,
    /// Response column
    pub y: Option<String>,
    pub training_frame: Option<DatasetHandle>,
    pub fold_column: Option<String>,
    /// Estimator parameters as stored before training
    pub params: Payload,
}

impl TrainingRequest {
    pub fn new(algo: impl Into<String>, params: Payload) -> Self {
        Self {
            algo: algo.into(),
            params,
            ..Default::default()
        }
    }
}

/// Status of a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Created,
    Running,
    Done,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Parse the upper-case status reported by the service.
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "CREATED" => Some(JobStatus::Created),
            "RUNNING" => Some(JobStatus::Running),
            "DONE" => Some(JobStatus::Done),
            "FAILED" => Some(JobStatus::Failed),
            "CANCELLED" => Some(JobStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed | JobStatus::Cancelled)
    }
}
