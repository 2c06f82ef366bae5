//! Lookup client trait.

use async_trait::async_trait;
use prospector_core::LookupResult;

/// A contact-intelligence provider that lists emails for a domain.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Credentials this provider needs.
    type Credentials: Send + Sync;

    /// Look up emails for `domain`.
    ///
    /// Never fails: missing credentials short-circuit to
    /// `SkippedNoCredentials` without a request, and every error is
    /// classified into the result's outcome.
    async fn lookup(&self, credentials: &Self::Credentials, domain: &str) -> LookupResult;

    /// Get the provider identifier.
    fn provider_id(&self) -> &'static str;
}

/// Treat blank strings as absent.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
