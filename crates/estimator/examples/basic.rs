//! Basic example demonstrating the Target Encoder binding
//!
//! Run with: cargo run --example basic -p estimator
//!
//! Note: talking to a live service needs a running cluster. This example
//! scripts the service responses to walk through the API offline.

use std::sync::Mutex;

use estimator::{
    DatasetHandle, Endpoint, EstimatorError, ModelBuilderTrainer, Payload, Result,
    TargetEncoderEstimator, TargetEncoderParams, TrainArgs, TransformOptions, Transport,
};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// Answers each route with a fixed body and logs the request.
struct ScriptedService {
    log: Mutex<Vec<String>>,
}

impl Transport for ScriptedService {
    fn call(&self, endpoint: &Endpoint, data: &Payload) -> Result<Value> {
        self.log
            .lock()
            .map_err(|e| EstimatorError::service(e.to_string()))?
            .push(format!("{} {:?}", endpoint, data.to_form()));

        match endpoint.to_string().as_str() {
            "POST /3/ModelBuilders/targetencoder" => Ok(json!({
                "job": { "key": { "name": "job_1" }, "dest": { "name": "te_titanic" } }
            })),
            "GET /3/TargetEncoderTransform" => Ok(json!({ "name": "titanic_te.hex" })),
            "GET /3/Frames/titanic_te.hex" => Ok(json!({
                "frames": [{
                    "frame_id": { "name": "titanic_te.hex" },
                    "columns": [{ "label": "cabin" }, { "label": "cabin_te" }, { "label": "survived" }]
                }]
            })),
            route => Err(EstimatorError::service_status(404, format!("No route {}", route))),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "estimator_core=debug".into()),
        )
        .init();

    println!("=== Target Encoder Example ===\n");

    let params = TargetEncoderParams::builder()
        .encoded_columns(&["cabin"])
        .target_column("survived")
        .blending(true)
        .k(10.0)
        .f(20.0)
        .build();

    let service = ScriptedService {
        log: Mutex::new(Vec::new()),
    };
    let mut te = TargetEncoderEstimator::from_params(service, &params)?;
    let trainer = ModelBuilderTrainer::new(te.transport().clone()).with_wait(false);
    te = te.with_trainer(trainer);

    println!("Parameters:");
    for (name, value) in te.params().iter() {
        println!("  {:<24} {}", name.as_str(), value);
    }

    let model = te.train(TrainArgs::new().training_frame("titanic.hex"))?;
    println!("\nTrained model: {}", model);

    let encoded = te.transform(
        &DatasetHandle::new("titanic.hex"),
        &TransformOptions::default().with_seed(1234),
    )?;
    println!("Encoded frame: {} {:?}", encoded, encoded.columns);

    println!("\nRequests sent:");
    if let Ok(log) = te.transport().log.lock() {
        for line in log.iter() {
            println!("  {}", line);
        }
    }

    Ok(())
}
