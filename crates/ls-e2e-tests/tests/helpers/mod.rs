//! Shared fixtures for E2E tests.
//!
//! Builds engines from TOML config the way the CLI does, pointed at a
//! wiremock server standing in for the model service.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ls_engine::ScoringEngine;
use ls_engine::config::ScoringConfig;
use ls_engine::factory::build_engine;
use ls_protocol::{LeadAttributes, OfferAttributes, ScoringRequest};

/// Engine using the remote classifier with an Ollama backend at `server`.
pub fn ollama_engine(server: &MockServer) -> ScoringEngine {
    let config = ScoringConfig::from_toml_str(&format!(
        r#"
classifier = "remote"
max_concurrency = 4

[remote]
backend = "ollama"
host = "{}"
model = "phi3:mini"
timeout_secs = 5
"#,
        server.uri()
    ))
    .unwrap();
    build_engine(&config).unwrap()
}

/// Engine using the remote classifier with a Gemini backend at `server`.
pub fn gemini_engine(server: &MockServer) -> ScoringEngine {
    let config = ScoringConfig::from_toml_str(&format!(
        r#"
classifier = "remote"

[remote]
backend = "gemini"
host = "{}"
api_key = "test-key"
timeout_secs = 5
"#,
        server.uri()
    ))
    .unwrap();
    build_engine(&config).unwrap()
}

/// Engine using the local classifier against a `/predict` endpoint at `server`.
pub fn local_engine(server: &MockServer) -> ScoringEngine {
    let config = ScoringConfig::from_toml_str(&format!(
        r#"
classifier = "local"

[local]
endpoint = "{}/predict"
timeout_secs = 5
reasoning_seed = 7
"#,
        server.uri()
    ))
    .unwrap();
    build_engine(&config).unwrap()
}

/// Mount an Ollama `/api/generate` mock that always replies with `text`.
pub async fn mount_ollama_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "phi3:mini",
            "response": text,
            "done": true
        })))
        .mount(server)
        .await;
}

/// Mount a `/predict` mock returning one `(label, score)` prediction.
pub async fn mount_prediction(server: &MockServer, label: &str, score: f64) {
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "label": label, "score": score },
            { "label": "OTHER", "score": 1.0 - score }
        ])))
        .mount(server)
        .await;
}

pub fn offer() -> OfferAttributes {
    OfferAttributes {
        name: "AI Outreach Automation".into(),
        value_propositions: vec!["24/7 outreach".into(), "6x more meetings".into()],
        ideal_use_cases: vec!["B2B SaaS mid-market".into()],
    }
}

pub fn lead(name: &str, role: &str, company: &str, industry: &str) -> LeadAttributes {
    LeadAttributes {
        name: name.into(),
        role: role.into(),
        company: company.into(),
        industry: industry.into(),
        location: "San Francisco".into(),
        bio: "Scaling outbound sales.".into(),
    }
}

/// A small mixed batch in the JSON shape the CLI reads.
pub fn sample_request() -> ScoringRequest {
    serde_json::from_value(json!({
        "offer": {
            "name": "AI Outreach Automation",
            "value_props": ["24/7 outreach", "6x more meetings"],
            "ideal_use_cases": ["B2B SaaS mid-market"]
        },
        "leads": [
            {
                "name": "Ava Patel",
                "role": "Head of Growth",
                "company": "FlowMetrics",
                "industry": "SaaS",
                "location": "Berlin",
                "linkedin_bio": "Growth leader"
            },
            {
                "name": "Ben Ortiz",
                "role": "Sales Intern",
                "company": "ShopCo",
                "industry": "Retail",
                "location": "Remote"
            },
            { "name": "Cara Lee" }
        ]
    }))
    .unwrap()
}
