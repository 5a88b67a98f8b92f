//! End-to-end tests for the estimator crate
//!
//! Complete configure → train → transform workflows against a scripted service.

mod common;

use std::time::Duration;

use common::{frame_body, job_body, job_status, strings, MockTransport, BUILD, TRANSFORM};
use estimator::{
    DataLeakageHandling, DatasetHandle, Endpoint, ParamValue, TargetEncoderEstimator,
    TargetEncoderParams, TrainArgs, TransformOptions,
};
use serde_json::json;

fn titanic_service() -> MockTransport {
    MockTransport::new()
        .respond(BUILD, job_body("job_te", "te_titanic"))
        .respond("GET /3/Jobs/job_te", job_status("CREATED"))
        .respond("GET /3/Jobs/job_te", job_status("RUNNING"))
        .respond("GET /3/Jobs/job_te", job_status("DONE"))
        .respond(TRANSFORM, json!({ "name": { "name": "titanic_te.hex" } }))
        .respond(
            "GET /3/Frames/titanic_te.hex",
            frame_body(
                "titanic_te.hex",
                &["home.dest", "cabin", "survived", "home.dest_te", "cabin_te"],
            ),
        )
}

fn titanic_frame() -> DatasetHandle {
    DatasetHandle::with_columns(
        "titanic.hex",
        strings(&["home.dest", "cabin", "age", "survived", "fold"]),
    )
}

#[test]
fn test_full_workflow_from_config_file() {
    let config = r#"{
        "encoded_columns": ["home.dest", "cabin"],
        "target_column": "survived",
        "blending": true,
        "k": 10,
        "f": 20,
        "data_leakage_handling": "k_fold",
        "fold_column": "fold"
    }"#;
    let params: TargetEncoderParams = serde_json::from_str(config).unwrap();

    let mut te = TargetEncoderEstimator::from_params(titanic_service(), &params)
        .unwrap()
        .with_poll_interval(Duration::ZERO);
    assert_eq!(te.data_leakage_handling(), Some(DataLeakageHandling::KFold));

    let model = te
        .train(
            TrainArgs::new()
                .encoded_columns(&["home.dest", "cabin"])
                .target_column("survived")
                .training_frame(titanic_frame()),
        )
        .unwrap();
    assert_eq!(model.id(), "te_titanic");

    let encoded = te
        .transform(
            &titanic_frame(),
            &TransformOptions::default()
                .with_data_leakage_handling("KFold")
                .with_seed(1234),
        )
        .unwrap();
    assert_eq!(encoded.key, "titanic_te.hex");
    assert!(encoded.columns.contains(&"cabin_te".to_string()));

    let build = &te.transport().calls_to(BUILD)[0];
    assert_eq!(build.get("k"), Some(&ParamValue::Float(10.0)));
    assert_eq!(build.get("f"), Some(&ParamValue::Float(20.0)));
    assert_eq!(build.get("data_leakage_handling"), Some(&ParamValue::from("k_fold")));
    assert_eq!(build.get("fold_column"), Some(&ParamValue::from("fold")));
    assert_eq!(build.get("ignored_columns"), Some(&ParamValue::from(vec!["age"])));

    let transform = &te.transport().calls_to(TRANSFORM)[0];
    assert_eq!(transform.get("model"), Some(&ParamValue::from("te_titanic")));
    assert_eq!(transform.get("frame"), Some(&ParamValue::from("titanic.hex")));
    assert_eq!(transform.get("seed"), Some(&ParamValue::Int(1234)));
}

#[test]
fn test_full_workflow_call_sequence() {
    let mut te = TargetEncoderEstimator::from_args(
        titanic_service(),
        vec![
            ("model_id", Some(ParamValue::from("requested_id"))),
            ("blending", Some(ParamValue::Bool(false))),
        ],
    )
    .unwrap()
    .with_poll_interval(Duration::ZERO);
    assert_eq!(te.model_id(), Some("requested_id"));

    te.train(
        TrainArgs::new()
            .x(&["cabin"])
            .y("survived")
            .training_frame("titanic.hex"),
    )
    .unwrap();

    te.transform(&DatasetHandle::new("test.hex"), &TransformOptions::default())
        .unwrap();

    let routes: Vec<String> = te
        .transport()
        .calls()
        .iter()
        .map(|(endpoint, _)| endpoint.to_string())
        .collect();
    assert_eq!(
        routes,
        vec![
            "POST /3/ModelBuilders/targetencoder",
            "GET /3/Jobs/job_te",
            "GET /3/Jobs/job_te",
            "GET /3/Jobs/job_te",
            "GET /3/TargetEncoderTransform",
            "GET /3/Frames/titanic_te.hex",
        ]
    );

    let build = &te.transport().calls_to(BUILD)[0];
    assert_eq!(build.get("model_id"), Some(&ParamValue::from("requested_id")));
    assert_eq!(build.get("encoded_columns"), Some(&ParamValue::from(vec!["cabin"])));
    assert!(!build.contains_key("ignored_columns"));
}

#[test]
fn test_transform_endpoint_route() {
    let endpoint = Endpoint::parse(TRANSFORM).unwrap();
    assert_eq!(endpoint.path, "/3/TargetEncoderTransform");
    assert_eq!(estimator::TRANSFORM_ROUTE, TRANSFORM);
}
