//! Target Encoder estimator binding.
//!
//! The encoding itself runs on the remote service. This binding validates and
//! stores hyperparameters, submits training through a [`TrainingRoutine`] and
//! issues transform requests against the trained model.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use estimator_api::{
    DataLeakageHandling, ParamName, ParameterSet, TargetEncoderParams, TransformOptions,
};
use estimator_spi::{
    DatasetHandle, Endpoint, EstimatorError, FrameResolver, ModelHandle, ParamValue, Payload,
    Result, TrainingRequest, TrainingRoutine, Transport,
};

use crate::trainer::ModelBuilderTrainer;

/// Remote transform endpoint.
pub const TRANSFORM_ROUTE: &str = "GET /3/TargetEncoderTransform";

// ============================================================================
// Train Arguments
// ============================================================================

/// Arguments to [`TargetEncoderEstimator::train`]; every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainArgs {
    /// Feature columns, defaults to `encoded_columns`
    pub x: Option<Vec<String>>,
    /// Response column, defaults to `target_column`
    pub y: Option<String>,
    pub fold_column: Option<String>,
    pub training_frame: Option<DatasetHandle>,
    pub encoded_columns: Option<Vec<String>>,
    pub target_column: Option<String>,
}

impl TrainArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the feature columns.
    pub fn x<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.x = Some(to_strings(columns));
        self
    }

    /// Set the response column.
    pub fn y(mut self, column: &str) -> Self {
        self.y = Some(column.to_string());
        self
    }

    /// Set the fold column.
    pub fn fold_column(mut self, column: &str) -> Self {
        self.fold_column = Some(column.to_string());
        self
    }

    /// Set the training frame.
    pub fn training_frame(mut self, frame: impl Into<DatasetHandle>) -> Self {
        self.training_frame = Some(frame.into());
        self
    }

    /// Set the columns to encode.
    pub fn encoded_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.encoded_columns = Some(to_strings(columns));
        self
    }

    /// Set the target column.
    pub fn target_column(mut self, column: &str) -> Self {
        self.target_column = Some(column.to_string());
        self
    }
}

fn to_strings<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|s| s.as_ref().to_string()).collect()
}

/// Insert the encoder-specific fields into an outgoing training payload.
///
/// `target_column` and `encoded_columns` are inserted when given. If the
/// payload still has no `encoded_columns`, `x` is used instead.
pub fn extend_params(
    mut payload: Payload,
    target_column: Option<&str>,
    encoded_columns: Option<&[String]>,
    x: Option<&[String]>,
) -> Payload {
    if let Some(target) = target_column {
        payload.insert("target_column", target);
    }
    if let Some(columns) = encoded_columns {
        payload.insert("encoded_columns", columns.to_vec());
    }
    if !payload.contains_key("encoded_columns") {
        if let Some(x) = x {
            payload.insert("encoded_columns", x.to_vec());
        }
    }
    payload
}

// ============================================================================
// Estimator
// ============================================================================

/// Client binding for the remote Target Encoder.
#[derive(Debug)]
pub struct TargetEncoderEstimator<T: Transport> {
    transport: Arc<T>,
    trainer: ModelBuilderTrainer<T>,
    params: ParameterSet,
    id: Option<String>,
    model: Option<ModelHandle>,
}

impl<T: Transport> TargetEncoderEstimator<T> {
    /// Algorithm name on the service.
    pub const ALGO: &'static str = "targetencoder";

    /// Create an unconfigured estimator.
    pub fn new(transport: T) -> Self {
        Self::with_shared(Arc::new(transport))
    }

    /// Create an estimator over a transport shared with other components.
    pub fn with_shared(transport: Arc<T>) -> Self {
        Self {
            trainer: ModelBuilderTrainer::new(Arc::clone(&transport)),
            transport,
            params: ParameterSet::new(),
            id: None,
            model: None,
        }
    }

    /// Construct from named arguments.
    ///
    /// Names outside the whitelist fail with `InvalidParameter`; values go
    /// through the same validation as [`TargetEncoderEstimator::set`].
    pub fn from_args<'a, I>(transport: T, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Option<ParamValue>)>,
    {
        let mut estimator = Self::new(transport);
        for (name, value) in args {
            estimator.set(name, value)?;
        }
        Ok(estimator)
    }

    /// Construct from an explicit parameter record.
    pub fn from_params(transport: T, params: &TargetEncoderParams) -> Result<Self> {
        let mut estimator = Self::new(transport);
        for (name, value) in params.to_args() {
            estimator.assign(name, Some(value))?;
        }
        Ok(estimator)
    }

    /// Replace the job poll interval of the default training routine.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.trainer = self.trainer.with_poll_interval(interval);
        self
    }

    /// Replace the default training routine.
    pub fn with_trainer(mut self, trainer: ModelBuilderTrainer<T>) -> Self {
        self.trainer = trainer;
        self
    }

    /// Transport used for every remote call.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// Set a parameter by name. `None` clears it.
    pub fn set(&mut self, name: &str, value: Option<ParamValue>) -> Result<()> {
        let param = match ParamName::parse(name) {
            Some(param) => param,
            None => {
                return Err(EstimatorError::InvalidParameter {
                    name: name.to_string(),
                    value: value.map_or_else(|| "None".to_string(), |v| v.to_string()),
                })
            }
        };
        self.assign(param, value)
    }

    /// Read a parameter by name; unknown names read as absent.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        ParamName::parse(name).and_then(|param| self.params.get(param))
    }

    /// Read a parameter by typed name.
    pub fn param(&self, name: ParamName) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// All parameters currently set.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    fn assign(&mut self, name: ParamName, value: Option<ParamValue>) -> Result<()> {
        self.params.set(name, value)?;
        if name == ParamName::ModelId {
            self.id = self.params.get(name).and_then(ParamValue::as_str).map(String::from);
        }
        Ok(())
    }

    /// Columns to encode.
    pub fn encoded_columns(&self) -> Option<&[String]> {
        self.params.get(ParamName::EncodedColumns).and_then(ParamValue::as_str_list)
    }

    /// Set the columns to encode.
    pub fn set_encoded_columns(&mut self, columns: Option<Vec<String>>) -> Result<()> {
        self.assign(ParamName::EncodedColumns, columns.map(ParamValue::StrList))
    }

    /// Target (response) column.
    pub fn target_column(&self) -> Option<&str> {
        self.params.get(ParamName::TargetColumn).and_then(ParamValue::as_str)
    }

    /// Set the target column.
    pub fn set_target_column(&mut self, column: Option<&str>) -> Result<()> {
        self.assign(ParamName::TargetColumn, column.map(ParamValue::from))
    }

    /// Whether blending is enabled.
    pub fn blending(&self) -> Option<bool> {
        self.params.get(ParamName::Blending).and_then(ParamValue::as_bool)
    }

    /// Set blending.
    pub fn set_blending(&mut self, blending: Option<bool>) -> Result<()> {
        self.assign(ParamName::Blending, blending.map(ParamValue::Bool))
    }

    /// Inflection point used for blending.
    pub fn k(&self) -> Option<f64> {
        self.params.get(ParamName::K).and_then(ParamValue::as_f64)
    }

    /// Set the blending inflection point.
    pub fn set_k(&mut self, k: Option<f64>) -> Result<()> {
        self.assign(ParamName::K, k.map(ParamValue::Float))
    }

    /// Smoothing factor used for blending.
    pub fn f(&self) -> Option<f64> {
        self.params.get(ParamName::F).and_then(ParamValue::as_f64)
    }

    /// Set the blending smoothing factor.
    pub fn set_f(&mut self, f: Option<f64>) -> Result<()> {
        self.assign(ParamName::F, f.map(ParamValue::Float))
    }

    /// Data leakage handling strategy.
    pub fn data_leakage_handling(&self) -> Option<DataLeakageHandling> {
        self.params
            .get(ParamName::DataLeakageHandling)
            .and_then(ParamValue::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Set the data leakage handling strategy.
    pub fn set_data_leakage_handling(&mut self, strategy: Option<DataLeakageHandling>) -> Result<()> {
        self.assign(ParamName::DataLeakageHandling, strategy.map(ParamValue::from))
    }

    /// Frame the encoder is trained on.
    pub fn training_frame(&self) -> Option<&DatasetHandle> {
        self.params.get(ParamName::TrainingFrame).and_then(ParamValue::as_frame)
    }

    /// Set the training frame.
    pub fn set_training_frame(&mut self, frame: Option<DatasetHandle>) -> Result<()> {
        self.assign(ParamName::TrainingFrame, frame.map(ParamValue::Frame))
    }

    /// Fold column used by k-fold leakage handling.
    pub fn fold_column(&self) -> Option<&str> {
        self.params.get(ParamName::FoldColumn).and_then(ParamValue::as_str)
    }

    /// Set the fold column.
    pub fn set_fold_column(&mut self, column: Option<&str>) -> Result<()> {
        self.assign(ParamName::FoldColumn, column.map(ParamValue::from))
    }

    /// Identity of the estimator on the service.
    pub fn model_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the identity of the estimator on the service.
    pub fn set_model_id(&mut self, id: Option<&str>) -> Result<()> {
        self.assign(ParamName::ModelId, id.map(ParamValue::from))
    }

    /// Handle of the trained model, if training has completed.
    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    // ------------------------------------------------------------------------
    // Training
    // ------------------------------------------------------------------------

    /// Train with the default model-builder routine.
    pub fn train(&mut self, args: TrainArgs) -> Result<ModelHandle> {
        let model = self.submit(&self.trainer, args)?;
        Ok(self.record(model))
    }

    /// Train with an explicitly supplied routine.
    pub fn train_with<R: TrainingRoutine + ?Sized>(
        &mut self,
        routine: &R,
        args: TrainArgs,
    ) -> Result<ModelHandle> {
        let model = self.submit(routine, args)?;
        Ok(self.record(model))
    }

    fn submit<R: TrainingRoutine + ?Sized>(&self, routine: &R, args: TrainArgs) -> Result<ModelHandle> {
        let TrainArgs {
            x,
            y,
            fold_column,
            training_frame,
            encoded_columns,
            target_column,
        } = args;

        let y = y.or_else(|| target_column.clone());
        let x = x.or_else(|| encoded_columns.clone());

        let request = TrainingRequest {
            algo: Self::ALGO.to_string(),
            x: x.clone(),
            y,
            training_frame: training_frame.or_else(|| self.training_frame().cloned()),
            fold_column: fold_column.or_else(|| self.fold_column().map(String::from)),
            params: self.params.to_payload(),
        };

        debug!(
            frame = ?request.training_frame.as_ref().map(|f| f.key.as_str()),
            "training target encoder"
        );

        let extend = move |payload: Payload| {
            extend_params(
                payload,
                target_column.as_deref(),
                encoded_columns.as_deref(),
                x.as_deref(),
            )
        };
        routine.train(request, &extend)
    }

    fn record(&mut self, model: ModelHandle) -> ModelHandle {
        info!(model = %model, "target encoder trained");
        self.id = Some(model.id.clone());
        self.model = Some(model.clone());
        model
    }

    // ------------------------------------------------------------------------
    // Transform
    // ------------------------------------------------------------------------

    /// Apply the trained encodings to `frame` on the service.
    ///
    /// Issues one `GET /3/TargetEncoderTransform` request and resolves the
    /// resulting frame by name.
    pub fn transform(&self, frame: &DatasetHandle, options: &TransformOptions) -> Result<DatasetHandle> {
        let endpoint = Endpoint::parse(TRANSFORM_ROUTE)?;
        let data = self.transform_payload(frame, options);

        let output = self.transport.call(&endpoint, &data)?;
        let name = output_name(&output)?;
        let encoded = self.transport.get_frame(name)?;

        info!(frame = %frame.key, output = %encoded.key, "target encoding applied");
        Ok(encoded)
    }

    /// Fields of a transform request; `model` is omitted before an identity is known.
    pub fn transform_payload(&self, frame: &DatasetHandle, options: &TransformOptions) -> Payload {
        let mut data = Payload::new()
            .with("frame", frame.key.as_str())
            .with("data_leakage_handling", options.data_leakage_handling.as_str())
            .with("noise", options.noise)
            .with("seed", options.seed);
        if let Some(id) = self.model_id() {
            data.insert("model", id);
        }
        data
    }
}

/// Output frame name of a transform response.
///
/// Accepts `name` as a string or as a key object (`{"name": ...}`).
fn output_name(output: &Value) -> Result<&str> {
    let name = output
        .get("name")
        .ok_or_else(|| EstimatorError::protocol("Transform response has no `name`"))?;
    name.as_str()
        .or_else(|| name.get("name").and_then(Value::as_str))
        .ok_or_else(|| EstimatorError::protocol(format!("Transform `name` is not a key: {}", name)))
}
