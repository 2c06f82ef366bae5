//! Paginated domain search against a Hunter-style API.

use crate::client::{present, LookupClient};
use crate::common::{build_http_client, finish_with_error, read_json};
use crate::error::{LookupError, Result};
use async_trait::async_trait;
use prospector_core::{HunterConfig, LookupResult};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;

const PROVIDER: &str = "hunter";

/// API key for the domain search endpoint.
#[derive(Clone, Default)]
pub struct HunterCredentials {
    /// API key
    pub api_key: Option<String>,
}

impl HunterCredentials {
    /// Credentials from the lookup configuration.
    #[must_use]
    pub fn from_config(config: &HunterConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
        }
    }
}

impl fmt::Debug for HunterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunterCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Walks fixed-size pages at increasing offsets until one comes back empty.
pub struct HunterClient {
    client: Client,
    base_url: String,
    page_size: u32,
    max_pages: u32,
}

impl HunterClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &HunterConfig, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(Some(timeout_secs))?,
            base_url: config.base_url.clone(),
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    /// Point the client at another server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_page(&self, api_key: &str, domain: &str, page: u32) -> Result<Vec<EmailEntry>> {
        let offset = u64::from(page) * u64::from(self.page_size);
        let response = self
            .client
            .get(format!(
                "{}/domain-search",
                self.base_url.trim_end_matches('/')
            ))
            .query(&[
                ("domain", domain.to_string()),
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
                ("api_key", api_key.to_string()),
            ])
            .send()
            .await?;

        let payload: DomainSearchResponse = read_json(PROVIDER, response).await?;
        payload.into_entries()
    }
}

#[async_trait]
impl LookupClient for HunterClient {
    type Credentials = HunterCredentials;

    async fn lookup(&self, credentials: &HunterCredentials, domain: &str) -> LookupResult {
        let Some(api_key) = present(credentials.api_key.as_ref()) else {
            tracing::warn!(provider = PROVIDER, "API key not provided, skipping");
            return LookupResult::skipped();
        };

        tracing::info!(provider = PROVIDER, "Fetching emails for {}", domain);
        let mut emails = Vec::new();

        for page in 0..self.max_pages {
            let entries = match self.fetch_page(api_key, domain, page).await {
                Ok(entries) => entries,
                Err(e) => return finish_with_error(PROVIDER, emails, &e),
            };

            if entries.is_empty() {
                tracing::debug!(provider = PROVIDER, page, "No more emails");
                break;
            }

            let before = emails.len();
            emails.extend(
                entries
                    .into_iter()
                    .filter_map(|entry| entry.value)
                    .filter(|email| !email.trim().is_empty()),
            );
            tracing::debug!(provider = PROVIDER, page, added = emails.len() - before, "Fetched page");
        }

        tracing::info!(provider = PROVIDER, "Fetched {} emails", emails.len());
        LookupResult::ok(emails)
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }
}

// Hunter API types

#[derive(Debug, Deserialize)]
struct DomainSearchResponse {
    #[serde(default)]
    data: Option<DomainData>,
    #[serde(default)]
    emails: Option<Vec<EmailEntry>>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

impl DomainSearchResponse {
    /// Emails may sit at the top level or under `data`; an `errors` field
    /// marks the whole page as failed.
    fn into_entries(self) -> Result<Vec<EmailEntry>> {
        if let Some(errors) = self.errors.filter(|e| !e.is_null()) {
            return Err(LookupError::ProviderError {
                provider: PROVIDER,
                code: error_code(&errors),
                message: errors.to_string(),
            });
        }

        Ok(self
            .emails
            .or_else(|| self.data.and_then(|d| d.emails))
            .unwrap_or_default())
    }
}

/// Status-like `code` of the first reported error.
fn error_code(errors: &serde_json::Value) -> Option<u16> {
    let first = errors.as_array().map_or(Some(errors), |list| list.first())?;
    first
        .get("code")
        .and_then(serde_json::Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
}

#[derive(Debug, Deserialize)]
struct DomainData {
    #[serde(default)]
    emails: Option<Vec<EmailEntry>>,
}

#[derive(Debug, Deserialize)]
struct EmailEntry {
    #[serde(default)]
    value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Vec<EmailEntry>> {
        serde_json::from_str::<DomainSearchResponse>(raw)
            .expect("parse payload")
            .into_entries()
    }

    #[test]
    fn test_emails_under_data() {
        let entries = parse(
            r#"{"data":{"domain":"acme.com","emails":[{"value":"a@acme.com"},{"type":"generic"}]},"meta":{}}"#,
        )
        .expect("entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value.as_deref(), Some("a@acme.com"));
        assert!(entries[1].value.is_none());
    }

    #[test]
    fn test_emails_top_level() {
        let entries = parse(r#"{"emails":[{"value":"b@acme.com"}]}"#).expect("entries");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_errors_payload() {
        let err = parse(r#"{"errors":[{"id":"wrong_params","code":400}]}"#).unwrap_err();
        assert!(matches!(
            err,
            LookupError::ProviderError {
                code: Some(400),
                ..
            }
        ));
        assert!(err.to_string().contains("wrong_params"));
    }

    #[test]
    fn test_error_code_shapes() {
        assert_eq!(error_code(&serde_json::json!([{ "code": 429 }])), Some(429));
        assert_eq!(error_code(&serde_json::json!({ "code": 403 })), Some(403));
        assert_eq!(error_code(&serde_json::json!([{ "id": "x" }])), None);
        assert_eq!(error_code(&serde_json::json!([{ "code": "429" }])), None);
        assert_eq!(error_code(&serde_json::json!([])), None);
    }

    #[test]
    fn test_null_errors_ignored() {
        let entries = parse(r#"{"data":{"emails":[]},"errors":null}"#).expect("entries");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = HunterCredentials {
            api_key: Some("secret".to_string()),
        };
        assert!(!format!("{creds:?}").contains("secret"));
    }
}
