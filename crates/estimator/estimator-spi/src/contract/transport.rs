//! Network collaborator contracts.

use serde_json::Value;
use tracing::debug;

use crate::error::{EstimatorError, Result};
use crate::model::{DatasetHandle, Endpoint, Payload};

/// Synchronous request/response access to the remote service.
///
/// Implementations issue exactly one round-trip per call and never retry.
pub trait Transport: Send + Sync {
    /// Call an endpoint and return the decoded JSON body.
    fn call(&self, endpoint: &Endpoint, data: &Payload) -> Result<Value>;
}

/// Resolves a dataset name to a handle on the service.
pub trait FrameResolver: Send + Sync {
    fn get_frame(&self, name: &str) -> Result<DatasetHandle>;
}

impl<T: Transport + ?Sized> FrameResolver for T {
    fn get_frame(&self, name: &str) -> Result<DatasetHandle> {
        let endpoint = Endpoint::get("/3/Frames").with_segment(name);
        debug!(frame = name, "resolving frame");
        let body = self.call(&endpoint, &Payload::new())?;
        parse_frame(&body)
    }
}

/// Read a frame summary (`frames[0]`) from a `/3/Frames` response.
pub fn parse_frame(body: &Value) -> Result<DatasetHandle> {
    let frame = body
        .get("frames")
        .and_then(|f| f.get(0))
        .ok_or_else(|| EstimatorError::protocol("Frames response has no `frames` entry"))?;

    let key = frame
        .get("frame_id")
        .and_then(|id| id.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| EstimatorError::protocol("Frame summary has no `frame_id.name`"))?;

    let columns = frame
        .get("columns")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .filter_map(|c| c.get("label").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(DatasetHandle::with_columns(key, columns))
}
