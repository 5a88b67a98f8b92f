//! Blocking HTTP transport.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use estimator_api::ConnectionConfig;
use estimator_spi::{Endpoint, EstimatorError, Method, Payload, Result, Transport};

use crate::target_encoder::TargetEncoderEstimator;

/// [`Transport`] over `reqwest::blocking`.
///
/// GET and DELETE send the payload as query pairs, POST as a form body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: Url,
    config: ConnectionConfig,
}

impl HttpTransport {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let base = directory_url(config.base()?);

        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            config,
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> Result<Url> {
        endpoint_url(&self.base, path)
    }
}

impl Transport for HttpTransport {
    fn call(&self, endpoint: &Endpoint, data: &Payload) -> Result<Value> {
        let url = self.url(&endpoint.path)?;
        let form = data.to_form();
        debug!(method = %endpoint.method, path = %endpoint.path, fields = form.len(), "request");

        let request = match endpoint.method {
            Method::Get => self.client.get(url).query(&form),
            Method::Delete => self.client.delete(url).query(&form),
            Method::Post => self.client.post(url).form(&form),
        };

        let response = request
            .send()
            .map_err(|e| EstimatorError::service(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| EstimatorError::service(e.to_string()))?;

        if !status.is_success() {
            return Err(EstimatorError::service_status(status.as_u16(), error_message(&text)));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl TargetEncoderEstimator<HttpTransport> {
    /// Create an estimator talking to the service described by `config`.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        let interval = Duration::from_millis(config.job_poll_interval_ms);
        Ok(Self::new(HttpTransport::new(config)?).with_poll_interval(interval))
    }
}

/// Make the base URL a directory so relative joins keep its path prefix.
fn directory_url(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| EstimatorError::ConfigError(format!("Invalid endpoint path {}: {}", path, e)))
}

/// Server error text: `msg`, then `exception_msg`, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("msg")
                .or_else(|| v.get("exception_msg"))
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
