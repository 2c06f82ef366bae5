//! Prospector Lookup - contact-intelligence API clients.
//!
//! Each client lists the emails a provider knows for a domain. Lookups
//! never fail outright: missing credentials skip the call, and every
//! transport, status or payload error is folded into a
//! [`prospector_core::LookupOutcome`].
//!
//! # Example
//!
//! ```rust,no_run
//! use prospector_core::LookupConfig;
//! use prospector_lookup::{HunterClient, HunterCredentials, LookupClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LookupConfig::default();
//! let client = HunterClient::new(&config.hunter, config.timeout_secs)?;
//! let creds = HunterCredentials {
//!     api_key: Some("key".to_string()),
//! };
//!
//! let result = client.lookup(&creds, "example.com").await;
//! println!("{}: {} emails", result.outcome, result.emails.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod common;
pub mod dehashed;
pub mod error;
pub mod hunter;

pub use client::LookupClient;
pub use common::build_http_client;
pub use dehashed::{DehashedClient, DehashedCredentials};
pub use error::{LookupError, Result};
pub use hunter::{HunterClient, HunterCredentials};
