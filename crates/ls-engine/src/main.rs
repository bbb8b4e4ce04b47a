//! Lead scoring CLI.
//!
//! Usage: `ls-engine [config.toml] <input.json>`
//!
//! Reads a scoring request (offer plus leads) from JSON, scores every lead
//! and prints the batch report as JSON on stdout. Logs go to stderr.

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use ls_engine::config::ScoringConfig;
use ls_engine::factory;
use ls_protocol::ScoringRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ls-engine starting");

    // ── Arguments ───────────────────────────────────────────────
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, input_path) = match args.as_slice() {
        [input] => (None, input.as_str()),
        [config, input] => (Some(config.as_str()), input.as_str()),
        _ => bail!("usage: ls-engine [config.toml] <input.json>"),
    };

    // ── Config ──────────────────────────────────────────────────
    let config = match config_path {
        Some(path) => ScoringConfig::from_file(path)?,
        None => ScoringConfig::default(),
    }
    .with_env();
    tracing::info!(
        classifier = ?config.classifier,
        max_concurrency = config.max_concurrency,
        "config loaded"
    );

    let engine = factory::build_engine(&config)?;

    // ── Input ───────────────────────────────────────────────────
    let raw = std::fs::read_to_string(input_path)
        .with_context(|| format!("failed to read input file {input_path}"))?;
    let request: ScoringRequest =
        serde_json::from_str(&raw).with_context(|| format!("invalid scoring request in {input_path}"))?;
    if request.leads.is_empty() {
        tracing::warn!(offer = %request.offer.name, "no leads to score");
    }

    // ── Score ───────────────────────────────────────────────────
    let report = engine.score_batch(request.leads, &request.offer).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
