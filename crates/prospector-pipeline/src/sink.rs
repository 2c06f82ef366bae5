//! Result sink contract.
//!
//! A sink receives the four result sequences once a run has aggregated
//! them. Storage is the sink's business; the pipeline only logs a failed
//! store and carries on.

use crate::error::SinkError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The four parallel sequences a run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultArtifacts {
    /// Harvested names, first-seen order
    pub names: Vec<String>,
    /// Emails built from the names
    pub synthesized_emails: Vec<String>,
    /// Emails from the bulk-search provider
    pub dehashed_emails: Vec<String>,
    /// Emails from the paginated domain-search provider
    pub hunter_emails: Vec<String>,
}

impl ResultArtifacts {
    /// Each sequence paired with its name.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &[String]); 4] {
        [
            ("names", self.names.as_slice()),
            ("synthesized_emails", self.synthesized_emails.as_slice()),
            ("dehashed_emails", self.dehashed_emails.as_slice()),
            ("hunter_emails", self.hunter_emails.as_slice()),
        ]
    }
}

/// Destination for a run's results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Store one run's artifacts.
    async fn store(&self, artifacts: &ResultArtifacts) -> Result<(), SinkError>;
}

/// Sink that only logs: sizes at `info`, full contents at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl ResultSink for TracingSink {
    async fn store(&self, artifacts: &ResultArtifacts) -> Result<(), SinkError> {
        for (name, values) in artifacts.named() {
            tracing::info!(artifact = name, count = values.len(), "Stored artifact");
        }
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("Artifacts: {}", serde_json::to_string(artifacts)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_order() {
        let artifacts = ResultArtifacts {
            names: vec!["Jane Doe".to_string()],
            ..ResultArtifacts::default()
        };
        let names: Vec<_> = artifacts.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["names", "synthesized_emails", "dehashed_emails", "hunter_emails"]
        );
        assert_eq!(artifacts.named()[0].1.len(), 1);
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_empty() {
        assert!(TracingSink.store(&ResultArtifacts::default()).await.is_ok());
    }
}
