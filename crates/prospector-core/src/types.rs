//! Shared types used across the Prospector crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified result of a single lookup-client invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Request(s) succeeded; emails may still be empty
    Ok,
    /// HTTP 401
    Unauthorized,
    /// HTTP 403
    Forbidden,
    /// HTTP 429
    RateLimited,
    /// DNS, TLS, timeout or connection failure
    NetworkError,
    /// Credentials were not configured, no request was made
    SkippedNoCredentials,
    /// Anything outside the taxonomy above
    UnknownError,
}

impl LookupOutcome {
    /// Classify a non-success HTTP status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            _ => Self::UnknownError,
        }
    }

    /// Whether the lookup ran without a classified failure.
    ///
    /// A skipped lookup counts as successful: missing credentials are a
    /// recovered condition.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::SkippedNoCredentials)
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ok => "ok",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::RateLimited => "rate limited",
            Self::NetworkError => "network error",
            Self::SkippedNoCredentials => "skipped (no credentials)",
            Self::UnknownError => "unknown error",
        };
        f.write_str(label)
    }
}

/// Emails returned by one lookup client together with how the call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Emails in provider order
    pub emails: Vec<String>,
    /// Classified outcome
    pub outcome: LookupOutcome,
}

impl LookupResult {
    /// Successful lookup carrying `emails`.
    #[must_use]
    pub fn ok(emails: Vec<String>) -> Self {
        Self {
            emails,
            outcome: LookupOutcome::Ok,
        }
    }

    /// Lookup skipped because credentials were absent.
    #[must_use]
    pub fn skipped() -> Self {
        Self::failed(LookupOutcome::SkippedNoCredentials)
    }

    /// Lookup that ended in `outcome` with nothing to show.
    #[must_use]
    pub fn failed(outcome: LookupOutcome) -> Self {
        Self {
            emails: Vec::new(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(LookupOutcome::from_status(401), LookupOutcome::Unauthorized);
        assert_eq!(LookupOutcome::from_status(403), LookupOutcome::Forbidden);
        assert_eq!(LookupOutcome::from_status(429), LookupOutcome::RateLimited);
        assert_eq!(LookupOutcome::from_status(500), LookupOutcome::UnknownError);
        assert_eq!(LookupOutcome::from_status(404), LookupOutcome::UnknownError);
    }

    #[test]
    fn test_skipped_is_empty_success() {
        let result = LookupResult::skipped();
        assert!(result.emails.is_empty());
        assert_eq!(result.outcome, LookupOutcome::SkippedNoCredentials);
        assert!(result.outcome.is_success());
        assert!(!LookupOutcome::RateLimited.is_success());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&LookupOutcome::RateLimited).expect("serialize");
        assert_eq!(json, "\"rate_limited\"");
    }
}
