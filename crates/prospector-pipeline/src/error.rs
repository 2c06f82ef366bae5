use prospector_core::ConfigError;
use prospector_lookup::LookupError;
use prospector_search::HarvestError;
use thiserror::Error;

/// Fail-fast conditions that stop a pipeline run.
///
/// Lookup failures are not here: they are reported per client through
/// [`prospector_core::LookupOutcome`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Harvest error: {0}")]
    Harvest(#[from] HarvestError),

    #[error("Lookup client setup failed: {0}")]
    Client(#[from] LookupError),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink rejected results: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
