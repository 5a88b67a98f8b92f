//! Estimator and connection configuration types.

use serde::{Deserialize, Serialize};
use url::Url;

use estimator_spi::{DatasetHandle, EstimatorError, ParamValue, Result};

use crate::schema::{DataLeakageHandling, ParamName};

// ============================================================================
// Estimator Parameters
// ============================================================================

/// Target Encoder hyperparameters as an explicit record.
///
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetEncoderParams {
    /// Columns to encode
    pub encoded_columns: Option<Vec<String>>,
    /// Target column for the encoding
    pub target_column: Option<String>,
    /// Blending enabled/disabled (server default: false)
    pub blending: Option<bool>,
    /// Inflection point used for blending (server default: 20)
    pub k: Option<f64>,
    /// Smoothing used for blending (server default: 10)
    pub f: Option<f64>,
    /// Data leakage handling strategy (server default: none)
    pub data_leakage_handling: Option<DataLeakageHandling>,
    pub model_id: Option<String>,
    /// Training data frame
    pub training_frame: Option<DatasetHandle>,
    /// Column with cross-validation fold index per observation
    pub fold_column: Option<String>,
}

impl TargetEncoderParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TargetEncoderParamsBuilder {
        TargetEncoderParamsBuilder::new()
    }

    /// Present fields as name/value pairs, in declaration order.
    pub fn to_args(&self) -> Vec<(ParamName, ParamValue)> {
        let mut args = Vec::new();
        if let Some(cols) = &self.encoded_columns {
            args.push((ParamName::EncodedColumns, ParamValue::StrList(cols.clone())));
        }
        if let Some(target) = &self.target_column {
            args.push((ParamName::TargetColumn, ParamValue::Str(target.clone())));
        }
        if let Some(blending) = self.blending {
            args.push((ParamName::Blending, ParamValue::Bool(blending)));
        }
        if let Some(k) = self.k {
            args.push((ParamName::K, ParamValue::Float(k)));
        }
        if let Some(f) = self.f {
            args.push((ParamName::F, ParamValue::Float(f)));
        }
        if let Some(strategy) = self.data_leakage_handling {
            args.push((ParamName::DataLeakageHandling, strategy.into()));
        }
        if let Some(id) = &self.model_id {
            args.push((ParamName::ModelId, ParamValue::Str(id.clone())));
        }
        if let Some(frame) = &self.training_frame {
            args.push((ParamName::TrainingFrame, ParamValue::Frame(frame.clone())));
        }
        if let Some(fold) = &self.fold_column {
            args.push((ParamName::FoldColumn, ParamValue::Str(fold.clone())));
        }
        args
    }
}

/// Builder for TargetEncoderParams.
#[derive(Debug, Default)]
pub struct TargetEncoderParamsBuilder {
    params: TargetEncoderParams,
}

impl TargetEncoderParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoded_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.params.encoded_columns = Some(columns.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    pub fn target_column(mut self, column: &str) -> Self {
        self.params.target_column = Some(column.to_string());
        self
    }

    pub fn blending(mut self, blending: bool) -> Self {
        self.params.blending = Some(blending);
        self
    }

    /// Set the inflection point.
    pub fn k(mut self, k: f64) -> Self {
        self.params.k = Some(k);
        self
    }

    /// Set the smoothing factor.
    pub fn f(mut self, f: f64) -> Self {
        self.params.f = Some(f);
        self
    }

    pub fn data_leakage_handling(mut self, strategy: DataLeakageHandling) -> Self {
        self.params.data_leakage_handling = Some(strategy);
        self
    }

    pub fn model_id(mut self, id: &str) -> Self {
        self.params.model_id = Some(id.to_string());
        self
    }

    pub fn training_frame(mut self, frame: impl Into<DatasetHandle>) -> Self {
        self.params.training_frame = Some(frame.into());
        self
    }

    pub fn fold_column(mut self, column: &str) -> Self {
        self.params.fold_column = Some(column.to_string());
        self
    }

    pub fn build(self) -> TargetEncoderParams {
        self.params
    }
}

// ============================================================================
// Transform Options
// ============================================================================

/// Noise sentinel: the server picks its default (0.01 * range of y).
pub const NOISE_SERVER_DEFAULT: f64 = -1.0;

/// Seed sentinel: the server seeds non-deterministically.
pub const SEED_SERVER_DEFAULT: i64 = -1;

/// Options for a transform request.
///
/// The strategy string is passed through as given (`"None"`, `"KFold"` or
/// `"LeaveOneOut"`); the server validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub data_leakage_handling: String,
    /// Amount of random noise added to the encoding
    pub noise: f64,
    /// Seed for the noise draws
    pub seed: i64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            data_leakage_handling: "None".to_string(),
            noise: NOISE_SERVER_DEFAULT,
            seed: SEED_SERVER_DEFAULT,
        }
    }
}

impl TransformOptions {
    pub fn new(data_leakage_handling: &str, noise: f64, seed: i64) -> Self {
        Self {
            data_leakage_handling: data_leakage_handling.to_string(),
            noise,
            seed,
        }
    }

    pub fn with_data_leakage_handling(mut self, strategy: &str) -> Self {
        self.data_leakage_handling = strategy.to_string();
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }
}

// ============================================================================
// Connection Configuration
// ============================================================================

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:54321";

/// Default delay between training job polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Connection settings for the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Service root, e.g. `http://localhost:54321`
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Delay between training job status polls
    pub job_poll_interval_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("estimator/", env!("CARGO_PKG_VERSION")).to_string(),
            job_poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration for the given service root.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::new()
    }

    /// Parse and check the base URL.
    pub fn base(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| EstimatorError::ConfigError(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(EstimatorError::ConfigError(format!(
                "Unsupported URL scheme: {}",
                scheme
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.base().map(|_| ())
    }
}

/// Builder for ConnectionConfig.
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    job_poll_interval_ms: Option<u64>,
}

impl ConnectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service root URL.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Set the delay between job status polls.
    pub fn job_poll_interval_ms(mut self, millis: u64) -> Self {
        self.job_poll_interval_ms = Some(millis);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ConnectionConfig> {
        let defaults = ConnectionConfig::default();
        let config = ConnectionConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            job_poll_interval_ms: self.job_poll_interval_ms.unwrap_or(defaults.job_poll_interval_ms),
        };
        config.validate()?;
        Ok(config)
    }
}
