//! Scripted transport shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use estimator::{Endpoint, EstimatorError, Payload, Result, Transport};
use serde_json::{json, Value};

/// Records every call and replays scripted responses per route.
///
/// Responses for a route are consumed in order; the last one repeats.
/// Unscripted routes answer with a 404 service error.
#[derive(Debug, Default)]
pub struct MockTransport {
    calls: Mutex<Vec<(Endpoint, Payload)>>,
    responses: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, route: &str, body: Value) -> Self {
        self.push(route, Ok(body));
        self
    }

    pub fn fail(self, route: &str, error: EstimatorError) -> Self {
        self.push(route, Err(error));
        self
    }

    fn push(&self, route: &str, response: Result<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<(Endpoint, Payload)> {
        self.calls.lock().unwrap().clone()
    }

    /// Payloads sent to one route, in call order.
    pub fn calls_to(&self, route: &str) -> Vec<Payload> {
        self.calls()
            .into_iter()
            .filter(|(endpoint, _)| endpoint.to_string() == route)
            .map(|(_, payload)| payload)
            .collect()
    }
}

impl Transport for MockTransport {
    fn call(&self, endpoint: &Endpoint, data: &Payload) -> Result<Value> {
        self.calls.lock().unwrap().push((endpoint.clone(), data.clone()));

        let route = endpoint.to_string();
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Err(EstimatorError::service_status(404, format!("No route {}", route))),
        }
    }
}

pub const TRANSFORM: &str = "GET /3/TargetEncoderTransform";
pub const BUILD: &str = "POST /3/ModelBuilders/targetencoder";

pub fn frame_body(name: &str, columns: &[&str]) -> Value {
    let columns: Vec<Value> = columns.iter().map(|c| json!({ "label": c })).collect();
    json!({
        "frames": [{
            "frame_id": { "name": name },
            "columns": columns
        }]
    })
}

pub fn job_body(job: &str, model: &str) -> Value {
    json!({
        "job": {
            "key": { "name": job },
            "dest": { "name": model },
            "status": "RUNNING"
        }
    })
}

pub fn job_status(status: &str) -> Value {
    json!({ "jobs": [{ "status": status, "progress": 1.0 }] })
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
