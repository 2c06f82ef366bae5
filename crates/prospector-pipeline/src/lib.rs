//! Prospector Pipeline - one contact-harvesting run end to end.
//!
//! [`ContactPipeline::run`] harvests names, synthesizes emails from them,
//! queries both lookup providers and aggregates every source into one
//! deduplicated set, then hands the four result sequences to a
//! [`ResultSink`].
//!
//! Failure handling:
//!
//! - **Fail fast**: invalid convention key, missing browser path, browser launch failure
//! - **Recovered**: aborted or partial harvest, skipped or failed lookups
//! - **Logged only**: sink failures

#![warn(missing_docs)]
#![warn(clippy::all)]

#[allow(missing_docs)]
pub mod error;
pub mod pipeline;
pub mod sink;

pub use error::{PipelineError, Result, SinkError};
pub use pipeline::{ContactPipeline, PipelineReport, PipelineRequest};
pub use sink::{ResultArtifacts, ResultSink, TracingSink};
