//! Generic model-builder training routine.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use estimator_api::DEFAULT_POLL_INTERVAL_MS;
use estimator_spi::{
    DatasetHandle, Endpoint, EstimatorError, JobStatus, ModelHandle, Payload, Result,
    TrainingRequest, TrainingRoutine, Transport,
};

/// Submits training through `POST /3/ModelBuilders/{algo}` and follows the
/// resulting job.
#[derive(Debug)]
pub struct ModelBuilderTrainer<T: Transport> {
    transport: Arc<T>,
    poll_interval: Duration,
    wait: bool,
}

impl<T: Transport> Clone for ModelBuilderTrainer<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            poll_interval: self.poll_interval,
            wait: self.wait,
        }
    }
}

impl<T: Transport> ModelBuilderTrainer<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            wait: true,
        }
    }

    /// Delay between job status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Whether `train` blocks until the job reaches a terminal status.
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Block until the job is done. Failed or cancelled jobs are service errors.
    pub fn wait_for_job(&self, job_key: &str) -> Result<()> {
        let endpoint = Endpoint::get("/3/Jobs").with_segment(job_key);
        loop {
            let body = self.transport.call(&endpoint, &Payload::new())?;
            let job = body
                .get("jobs")
                .and_then(|jobs| jobs.get(0))
                .ok_or_else(|| EstimatorError::protocol("Jobs response has no `jobs` entry"))?;
            let raw = job
                .get("status")
                .and_then(Value::as_str)
                .ok_or_else(|| EstimatorError::protocol("Job has no `status`"))?;
            let status = JobStatus::parse(raw)
                .ok_or_else(|| EstimatorError::protocol(format!("Unknown job status: {}", raw)))?;

            debug!(job = job_key, status = raw, "polled training job");

            if !status.is_terminal() {
                thread::sleep(self.poll_interval);
                continue;
            }
            if status == JobStatus::Done {
                return Ok(());
            }

            let detail = job_failure_detail(job);
            warn!(job = job_key, status = raw, "training job did not finish");
            return Err(EstimatorError::service(format!(
                "Job {} {}: {}",
                job_key, raw, detail
            )));
        }
    }
}

impl<T: Transport> TrainingRoutine for ModelBuilderTrainer<T> {
    fn train(
        &self,
        request: TrainingRequest,
        extend: &dyn Fn(Payload) -> Payload,
    ) -> Result<ModelHandle> {
        let payload = extend(builder_payload(&request));
        let endpoint = Endpoint::post("/3/ModelBuilders").with_segment(&request.algo);

        info!(algo = %request.algo, fields = payload.len(), "submitting training job");
        let response = self.transport.call(&endpoint, &payload)?;

        let job = response
            .get("job")
            .ok_or_else(|| EstimatorError::protocol("ModelBuilders response has no `job`"))?;
        let job_key = job
            .pointer("/key/name")
            .and_then(Value::as_str)
            .ok_or_else(|| EstimatorError::protocol("Job has no `key.name`"))?;
        let dest = job
            .pointer("/dest/name")
            .and_then(Value::as_str)
            .ok_or_else(|| EstimatorError::protocol("Job has no `dest.name`"))?;

        if self.wait {
            self.wait_for_job(job_key)?;
            info!(model = dest, "training job done");
        }

        Ok(ModelHandle::new(dest))
    }
}

/// Generic model-builder fields derived from a training request.
///
/// `ignored_columns` is only derived when both the features and the frame's
/// column labels are known.
pub fn builder_payload(request: &TrainingRequest) -> Payload {
    let mut payload = request.params.clone();

    if let Some(y) = &request.y {
        payload.insert("response_column", y.as_str());
    }
    if let Some(fold) = &request.fold_column {
        payload.insert("fold_column", fold.as_str());
    }
    if let Some(frame) = &request.training_frame {
        payload.insert("training_frame", frame.key.as_str());
        if let Some(x) = request.x.as_ref().filter(|_| frame.has_columns()) {
            let ignored = ignored_columns(frame, x, request.y.as_deref(), request.fold_column.as_deref());
            if !ignored.is_empty() {
                payload.insert("ignored_columns", ignored);
            }
        }
    }

    payload
}

fn ignored_columns(
    frame: &DatasetHandle,
    x: &[String],
    y: Option<&str>,
    fold_column: Option<&str>,
) -> Vec<String> {
    frame
        .columns
        .iter()
        .filter(|c| !x.contains(c))
        .filter(|c| Some(c.as_str()) != y && Some(c.as_str()) != fold_column)
        .cloned()
        .collect()
}

fn job_failure_detail(job: &Value) -> String {
    if let Some(exception) = job.get("exception").and_then(Value::as_str) {
        return exception.to_string();
    }
    match job.get("warnings").and_then(Value::as_array) {
        Some(warnings) if !warnings.is_empty() => warnings
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => "no details reported".to_string(),
    }
}
