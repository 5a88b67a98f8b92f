//! Estimator error types.

use thiserror::Error;

/// Errors raised by estimator bindings.
#[derive(Debug, Clone, Error)]
pub enum EstimatorError {
    /// Construction argument outside the parameter whitelist
    #[error("Unknown parameter {name} = {value}")]
    InvalidParameter { name: String, value: String },

    /// Setter received a value of the wrong shape
    #[error("Parameter `{name}` expects {expected}, got {received}")]
    TypeMismatch {
        name: String,
        expected: String,
        received: String,
    },

    /// Remote call failed (network failure or non-success status)
    #[error("{}", service_message(.status, .message))]
    ServiceError {
        status: Option<u16>,
        message: String,
    },

    /// Response did not have the expected shape
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Invalid connection configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn service_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Service error [{}]: {}", code, message),
        None => format!("Service error: {}", message),
    }
}

impl EstimatorError {
    /// Service error without an HTTP status (network level failure).
    pub fn service(message: impl Into<String>) -> Self {
        EstimatorError::ServiceError {
            status: None,
            message: message.into(),
        }
    }

    /// Service error carrying the HTTP status returned by the server.
    pub fn service_status(status: u16, message: impl Into<String>) -> Self {
        EstimatorError::ServiceError {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Protocol error from any displayable cause.
    pub fn protocol(message: impl Into<String>) -> Self {
        EstimatorError::ProtocolError(message.into())
    }
}

impl From<serde_json::Error> for EstimatorError {
    fn from(err: serde_json::Error) -> Self {
        EstimatorError::ProtocolError(err.to_string())
    }
}

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;
