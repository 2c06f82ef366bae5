//! Prospector application shell
//!
//! Loads configuration, wires the Chrome launcher, the challenge gate and
//! both lookup clients into a pipeline, and runs it once. Core logic lives
//! in the `crates/` directory.

use anyhow::Context;
use prospector_browser::ChromeLauncher;
use prospector_core::{AggregatedResult, AppConfig};
use prospector_pipeline::{ContactPipeline, PipelineReport, PipelineRequest};
use prospector_search::{CaptchaGate, ManualSolver};
use tracing::info;

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,prospector=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run one pipeline invocation for the configured target.
pub async fn run(config: &AppConfig) -> anyhow::Result<PipelineReport> {
    config.validate().context("invalid configuration")?;
    let request = PipelineRequest::from_config(config)?;

    let launcher = ChromeLauncher::from_config(&config.browser);
    let gate = CaptchaGate::new(
        config.search.challenge_selector.clone(),
        Box::new(ManualSolver),
    );
    let pipeline = ContactPipeline::from_config(config, launcher, gate)?;

    info!(
        "Harvesting contacts for {} ({})",
        request.organization, request.domain
    );
    let report = pipeline.run(&request).await?;

    info!(
        names = report.harvest.names.len(),
        synthesized = report.synthesized.len(),
        dehashed = report.dehashed.emails.len(),
        hunter = report.hunter.emails.len(),
        "Per-source counts"
    );
    Ok(report)
}

/// One email per line, sorted.
#[must_use]
pub fn render_emails(aggregated: &AggregatedResult) -> String {
    aggregated
        .emails
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
