//! Prospector Core - Foundation crate for the contact-harvesting pipeline.
//!
//! This crate provides shared types, the email conventions and synthesizer,
//! the cross-source aggregator, configuration management and error handling
//! that the other Prospector crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Lookup outcome taxonomy and results
//! - [`convention`] - Name-to-email conventions and [`synthesize`]
//! - [`aggregate`] - Exact-match union of all email sources
//!
//! # Example
//!
//! ```rust
//! use prospector_core::{aggregate, synthesize, LookupResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let names = vec!["Jane Doe".to_string(), "Madonna".to_string()];
//! let synthesized = synthesize(&names, "acme.com", 2)?;
//! assert_eq!(synthesized, vec!["jane.doe@acme.com".to_string()]);
//!
//! let merged = aggregate(
//!     &synthesized,
//!     &LookupResult::ok(vec!["jane.doe@acme.com".to_string()]),
//!     &LookupResult::skipped(),
//! );
//! assert_eq!(merged.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregate;
pub mod config;
pub mod convention;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use aggregate::{aggregate, AggregatedResult};
pub use config::{
    AppConfig, BrowserConfig, DehashedConfig, HunterConfig, LookupConfig, PauseRange,
    SearchConfig, TargetConfig,
};
pub use convention::{synthesize, EmailConvention};
pub use error::{ConfigError, ConfigResult};
pub use types::{LookupOutcome, LookupResult};
