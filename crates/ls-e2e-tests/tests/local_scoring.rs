//! E2E tests for the local classifier against a mock text-classification server.

mod helpers;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{lead, local_engine, mount_prediction, offer, sample_request};
use ls_engine::config::ScoringConfig;
use ls_engine::factory::build_engine;
use ls_protocol::IntentTier;

/// A confident prediction for a senior lead scores High with templated reasoning.
#[tokio::test]
async fn e2e_local_confident_senior_lead_is_high() {
    let server = MockServer::start().await;
    mount_prediction(&server, "POSITIVE", 0.92).await;
    let engine = local_engine(&server);

    let result = engine
        .score_lead(&lead("Ava Patel", "VP Sales", "FlowMetrics", "SaaS"), &offer())
        .await;
    assert_eq!(result.intent, IntentTier::High);
    assert_eq!(result.total_score, 100);
    assert!(result.reasoning.contains("Ava Patel"));
    assert!(result.reasoning.contains("FlowMetrics"));
    assert!(!result.is_fail_safe());
}

/// Confidence in the middle band is Medium whatever the label says.
#[tokio::test]
async fn e2e_local_negative_label_mid_confidence_is_medium() {
    let server = MockServer::start().await;
    mount_prediction(&server, "NEGATIVE", 0.7).await;
    let engine = local_engine(&server);

    let result = engine
        .score_lead(&lead("Ben Ortiz", "Analyst", "OpsCo", "Logistics"), &offer())
        .await;
    assert_eq!(result.intent, IntentTier::Medium);
    assert_eq!(result.model_score, 30);
}

/// Low confidence is Low even for a CEO.
#[tokio::test]
async fn e2e_local_low_confidence_is_low() {
    let server = MockServer::start().await;
    mount_prediction(&server, "POSITIVE", 0.55).await;
    let engine = local_engine(&server);

    let result = engine
        .score_lead(&lead("Ava Patel", "CEO", "FlowMetrics", "SaaS"), &offer())
        .await;
    assert_eq!(result.intent, IntentTier::Low);
    assert_eq!(result.total_score, 60);
    assert!(!result.is_fail_safe());
}

/// Nested `[[...]]` responses from text-embeddings-inference are accepted.
#[tokio::test]
async fn e2e_local_nested_prediction_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "NEGATIVE", "score": 0.1 },
            { "label": "POSITIVE", "score": 0.9 }
        ]])))
        .mount(&server)
        .await;
    let engine = local_engine(&server);

    let result = engine
        .score_lead(&lead("Ava Patel", "Director", "FlowMetrics", "Retail"), &offer())
        .await;
    assert_eq!(result.intent, IntentTier::High);
}

/// The model sees a truncated plain-text prompt, and the API token is sent.
#[tokio::test]
async fn e2e_local_request_shape_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "label": "POSITIVE", "score": 0.8 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScoringConfig::from_toml_str(&format!(
        r#"
[local]
endpoint = "{}/predict"
api_token = "hf_test"
"#,
        server.uri()
    ))
    .unwrap();
    let engine = build_engine(&config).unwrap();

    let mut l = lead("Ava Patel", "CEO", "FlowMetrics", "SaaS");
    l.company = "X".repeat(2000);
    let result = engine.score_lead(&l, &offer()).await;
    assert_eq!(result.intent, IntentTier::High);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let inputs = body["inputs"].as_str().unwrap();
    assert_eq!(inputs.chars().count(), 512);
    assert!(inputs.starts_with("Analyze buying intent for this prospect:"));
}

/// Batch through the local model; leads without role or industry fall to Medium.
#[tokio::test]
async fn e2e_local_batch() {
    let server = MockServer::start().await;
    mount_prediction(&server, "POSITIVE", 0.9).await;
    let engine = local_engine(&server);
    let request = sample_request();

    let report = engine.score_batch(request.leads, &request.offer).await;
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].result.intent, IntentTier::High);
    assert_eq!(report.results[0].result.total_score, 100);
    assert_eq!(report.results[2].lead.name, "Cara Lee");
    assert_eq!(report.results[2].result.intent, IntentTier::Medium);
    assert_eq!(report.results[2].result.total_score, 30);
    assert_eq!(report.fail_safe_count, 0);
    assert_eq!(report.counts.total(), 3);
}
