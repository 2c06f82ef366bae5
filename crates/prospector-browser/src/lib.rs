//! Browser automation for search-engine harvesting.
//!
//! Provides a randomized evasion profile, the driver abstraction the
//! harvester runs against, and its headless Chrome implementation.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::{BrowserActions, ContextLauncher};
pub use engine::{BrowserEngine, ChromeLauncher};
pub use error::{BrowserError, Result};
pub use fingerprint::{load_user_agents, EvasionProfile, DEFAULT_USER_AGENT};
