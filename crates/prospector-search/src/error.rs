//! Error types for the harvester.

use prospector_browser::BrowserError;
use thiserror::Error;

/// Conditions that stop a harvest before a session can start.
///
/// Challenges and mid-session faults are not errors; they end the session
/// and are reported through [`crate::HarvestReport`].
#[derive(Error, Debug)]
pub enum HarvestError {
    /// No browser executable was configured
    #[error("browser executable path is missing")]
    MissingBrowserPath,

    /// The browsing context could not be started
    #[error("failed to launch browsing context: {0}")]
    Launch(#[source] BrowserError),
}

/// Result type for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
