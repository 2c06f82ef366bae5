//! Common utilities shared across lookup clients.

use crate::error::{LookupError, Result};
use prospector_core::{LookupOutcome, LookupResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a standard HTTP client with common timeout settings.
///
/// # Arguments
/// * `timeout_secs` - Timeout in seconds (defaults to 30 if not specified)
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.unwrap_or(30)))
        .build()
        .map_err(|e| LookupError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Check the status of `response` and decode its JSON body.
///
/// Non-success statuses become [`LookupError::ApiError`] carrying the body text.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(LookupError::ApiError {
            provider,
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| LookupError::ParseError {
        provider,
        message: format!("Failed to parse response: {e}"),
    })
}

/// Turn a failed lookup into its result, keeping any emails already
/// collected. With partial data the lookup still counts as `Ok`.
pub(crate) fn finish_with_error(
    provider: &'static str,
    emails: Vec<String>,
    error: &LookupError,
) -> LookupResult {
    let outcome = error.outcome();
    if emails.is_empty() {
        log_failure(provider, outcome, error);
        LookupResult::failed(outcome)
    } else {
        tracing::warn!(
            provider,
            outcome = %outcome,
            "Stopped after {} emails: {}",
            emails.len(),
            error
        );
        LookupResult::ok(emails)
    }
}

pub(crate) fn log_failure(provider: &'static str, outcome: LookupOutcome, error: &LookupError) {
    match outcome {
        LookupOutcome::Unauthorized => {
            tracing::error!(provider, "Unauthorized: invalid API credentials");
        }
        LookupOutcome::Forbidden => {
            tracing::error!(provider, "Forbidden: access denied, check account permissions");
        }
        LookupOutcome::RateLimited => {
            tracing::error!(provider, "Rate limited: too many requests, retry later");
        }
        LookupOutcome::NetworkError => {
            tracing::error!(provider, "Network error: {}", error);
        }
        _ => tracing::error!(provider, "Lookup failed: {}", error),
    }
}
