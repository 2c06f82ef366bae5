//! Error types for the lookup clients.
//!
//! These never leave a client: [`crate::LookupClient::lookup`] classifies
//! every error into a [`LookupOutcome`].

use prospector_core::LookupOutcome;
use thiserror::Error;

/// Errors that can occur while talking to a contact-intelligence provider.
#[derive(Error, Debug)]
pub enum LookupError {
    /// API answered with a non-success status
    #[error("API error ({provider}): status {status}, {message}")]
    ApiError {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Provider reported an error inside a successful response
    #[error("provider error ({provider}): {message}")]
    ProviderError {
        /// Provider name
        provider: &'static str,
        /// HTTP-style code carried in the payload, if any
        code: Option<u16>,
        /// Error payload as text
        message: String,
    },

    /// Transport failure (DNS, TLS, timeout, connection reset)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Response parsing error
    #[error("failed to parse response from {provider}: {message}")]
    ParseError {
        /// Provider name
        provider: &'static str,
        /// Error message
        message: String,
    },

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Map to the outcome taxonomy.
    #[must_use]
    pub fn outcome(&self) -> LookupOutcome {
        match self {
            Self::ApiError { status, .. } => LookupOutcome::from_status(*status),
            Self::Network(_) => LookupOutcome::NetworkError,
            Self::ProviderError { code, .. } => {
                code.map_or(LookupOutcome::UnknownError, LookupOutcome::from_status)
            }
            Self::ParseError { .. } | Self::Internal(_) => LookupOutcome::UnknownError,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Internal(err.to_string())
        } else if let Some(status) = err.status() {
            Self::ApiError {
                provider: "unknown",
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
