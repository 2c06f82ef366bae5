//! Contact pipeline for coordinating one harvesting run.
//!
//! This module provides the `ContactPipeline` which runs the harvester,
//! synthesizes emails from the harvested names, queries both lookup
//! providers and merges everything into one set. A pipeline holds no
//! state between runs; every dependency is passed in at construction.

use crate::error::{PipelineError, Result};
use crate::sink::{ResultArtifacts, ResultSink, TracingSink};
use chrono::{DateTime, Utc};
use prospector_browser::{ContextLauncher, EvasionProfile};
use prospector_core::{
    aggregate, synthesize, AggregatedResult, AppConfig, ConfigError, EmailConvention,
    LookupResult,
};
use prospector_lookup::{
    DehashedClient, DehashedCredentials, HunterClient, HunterCredentials, LookupClient,
};
use prospector_search::{CaptchaGate, HarvestReport, Harvester};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

/// What to harvest and how to turn names into emails.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Organization searched for on the professional network
    pub organization: String,
    /// Email domain of the organization
    pub domain: String,
    /// Naming convention key (1-4)
    pub convention_key: u8,
    /// Browser executable
    pub browser_path: PathBuf,
    /// Optional user-agent list, one per line
    pub user_agents_file: Option<PathBuf>,
}

impl PipelineRequest {
    /// Build a request from the `[target]` and `[browser]` sections.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingValue` if no browser executable is set.
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, ConfigError> {
        let browser_path =
            config
                .browser
                .executable
                .clone()
                .ok_or_else(|| ConfigError::MissingValue {
                    field: "browser.executable".to_string(),
                })?;

        Ok(Self {
            organization: config.target.organization.clone(),
            domain: config.target.domain.clone(),
            convention_key: config.target.email_format,
            browser_path,
            user_agents_file: config.browser.user_agents_file.clone(),
        })
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// How the harvest ended, including the harvested names
    pub harvest: HarvestReport,
    /// Emails synthesized from the names
    pub synthesized: Vec<String>,
    /// Bulk-search provider result
    pub dehashed: LookupResult,
    /// Paginated domain-search provider result
    pub hunter: LookupResult,
    /// Union of every email source
    pub aggregated: AggregatedResult,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

impl PipelineReport {
    /// The four sequences handed to the result sink.
    #[must_use]
    pub fn artifacts(&self) -> ResultArtifacts {
        ResultArtifacts {
            names: self.harvest.names.clone(),
            synthesized_emails: self.synthesized.clone(),
            dehashed_emails: self.dehashed.emails.clone(),
            hunter_emails: self.hunter.emails.clone(),
        }
    }
}

/// Orchestrates harvesting, synthesis, lookups and aggregation.
pub struct ContactPipeline<L: ContextLauncher> {
    harvester: Harvester<L>,
    dehashed: DehashedClient,
    hunter: HunterClient,
    dehashed_credentials: DehashedCredentials,
    hunter_credentials: HunterCredentials,
    sink: Arc<dyn ResultSink>,
    concurrent_lookups: bool,
}

impl<L: ContextLauncher> ContactPipeline<L> {
    /// Create a pipeline with no credentials and a logging sink.
    #[must_use]
    pub fn new(harvester: Harvester<L>, dehashed: DehashedClient, hunter: HunterClient) -> Self {
        Self {
            harvester,
            dehashed,
            hunter,
            dehashed_credentials: DehashedCredentials::default(),
            hunter_credentials: HunterCredentials::default(),
            sink: Arc::new(TracingSink),
            concurrent_lookups: true,
        }
    }

    /// Wire a pipeline from configuration.
    ///
    /// # Errors
    /// Returns error if an HTTP client cannot be created.
    pub fn from_config(config: &AppConfig, launcher: L, gate: CaptchaGate) -> Result<Self> {
        let lookup = &config.lookup;
        let harvester = Harvester::new(launcher, gate, config.search.clone());
        let dehashed = DehashedClient::new(&lookup.dehashed, lookup.timeout_secs)?;
        let hunter = HunterClient::new(&lookup.hunter, lookup.timeout_secs)?;

        Ok(Self::new(harvester, dehashed, hunter)
            .with_credentials(
                DehashedCredentials::from_config(&lookup.dehashed),
                HunterCredentials::from_config(&lookup.hunter),
            )
            .with_concurrent_lookups(lookup.concurrent))
    }

    #[must_use]
    pub fn with_credentials(
        mut self,
        dehashed: DehashedCredentials,
        hunter: HunterCredentials,
    ) -> Self {
        self.dehashed_credentials = dehashed;
        self.hunter_credentials = hunter;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run both lookups at once instead of one after the other.
    #[must_use]
    pub fn with_concurrent_lookups(mut self, concurrent: bool) -> Self {
        self.concurrent_lookups = concurrent;
        self
    }

    /// Execute one run.
    ///
    /// An invalid convention key or a missing browser path stops the run
    /// before the browser starts. An aborted or partial harvest still runs
    /// the lookups; lookup failures only show in their outcomes.
    pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineReport> {
        let convention = EmailConvention::from_key(request.convention_key)?;
        let span = tracing::info_span!(
            "pipeline",
            organization = %request.organization,
            domain = %request.domain
        );

        async {
            tracing::info!("Starting run using convention {}", convention.key());

            let profile = EvasionProfile::randomized(request.user_agents_file.as_deref());
            let harvest = self
                .harvester
                .harvest(&request.organization, &request.browser_path, &profile)
                .await?;
            if harvest.aborted {
                tracing::warn!("Harvest aborted, continuing with lookups only");
            }

            let synthesized = synthesize(&harvest.names, &request.domain, convention.key())?;
            tracing::info!(
                names = harvest.names.len(),
                count = synthesized.len(),
                "Synthesized emails"
            );

            let (dehashed, hunter) = self.lookup(&request.domain).await;
            let aggregated = aggregate(&synthesized, &dehashed, &hunter);

            let report = PipelineReport {
                harvest,
                synthesized,
                dehashed,
                hunter,
                aggregated,
                completed_at: Utc::now(),
            };

            if let Err(e) = self.sink.store(&report.artifacts()).await {
                tracing::error!("Failed to store results: {}", e);
            }

            tracing::info!(
                dehashed = %report.dehashed.outcome,
                hunter = %report.hunter.outcome,
                "Run completed with {} unique emails",
                report.aggregated.len()
            );
            Ok::<_, PipelineError>(report)
        }
        .instrument(span)
        .await
    }

    async fn lookup(&self, domain: &str) -> (LookupResult, LookupResult) {
        let dehashed = self.dehashed.lookup(&self.dehashed_credentials, domain);
        let hunter = self.hunter.lookup(&self.hunter_credentials, domain);

        if self.concurrent_lookups {
            tokio::join!(dehashed, hunter)
        } else {
            let dehashed = dehashed.await;
            (dehashed, hunter.await)
        }
    }
}
