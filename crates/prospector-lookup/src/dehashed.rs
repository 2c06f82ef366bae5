//! Bulk domain search against a Dehashed-style API.

use crate::client::{present, LookupClient};
use crate::common::{build_http_client, finish_with_error, read_json};
use crate::error::Result;
use async_trait::async_trait;
use prospector_core::{DehashedConfig, LookupResult};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;

const PROVIDER: &str = "dehashed";

/// Username/key pair for basic authentication.
#[derive(Clone, Default)]
pub struct DehashedCredentials {
    /// Account username
    pub username: Option<String>,
    /// API key
    pub api_key: Option<String>,
}

impl DehashedCredentials {
    /// Credentials from the lookup configuration.
    #[must_use]
    pub fn from_config(config: &DehashedConfig) -> Self {
        Self {
            username: config.username.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn usable(&self) -> Option<(&str, &str)> {
        Some((
            present(self.username.as_ref())?,
            present(self.api_key.as_ref())?,
        ))
    }
}

impl fmt::Debug for DehashedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DehashedCredentials")
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Single bulk query with a fixed result cap.
pub struct DehashedClient {
    client: Client,
    base_url: String,
    size_cap: u32,
}

impl DehashedClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &DehashedConfig, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(Some(timeout_secs))?,
            base_url: config.base_url.clone(),
            size_cap: config.size_cap,
        })
    }

    /// Point the client at another server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn search(&self, username: &str, api_key: &str, domain: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url.trim_end_matches('/')))
            .header(ACCEPT, "application/json")
            .basic_auth(username, Some(api_key))
            .query(&[
                ("query", format!("domain:{domain}")),
                ("size", self.size_cap.to_string()),
            ])
            .send()
            .await?;

        let payload: SearchResponse = read_json(PROVIDER, response).await?;
        Ok(payload.into_emails())
    }
}

#[async_trait]
impl LookupClient for DehashedClient {
    type Credentials = DehashedCredentials;

    async fn lookup(&self, credentials: &DehashedCredentials, domain: &str) -> LookupResult {
        let Some((username, api_key)) = credentials.usable() else {
            tracing::warn!(provider = PROVIDER, "API key or username not provided, skipping");
            return LookupResult::skipped();
        };

        tracing::info!(provider = PROVIDER, "Fetching emails for {}", domain);
        match self.search(username, api_key, domain).await {
            Ok(emails) => {
                tracing::info!(provider = PROVIDER, "Fetched {} emails", emails.len());
                LookupResult::ok(emails)
            }
            Err(e) => finish_with_error(PROVIDER, Vec::new(), &e),
        }
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }
}

// Dehashed API types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    entries: Option<Vec<Entry>>,
}

impl SearchResponse {
    fn into_emails(self) -> Vec<String> {
        self.entries
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| entry.email)
            .flat_map(EmailField::into_vec)
            .filter(|email| !email.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    email: Option<EmailField>,
}

/// Older responses carry one string, newer ones a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmailField {
    One(String),
    Many(Vec<String>),
}

impl EmailField {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(email) => vec![email],
            Self::Many(emails) => emails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_without_email_are_skipped() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{"entries":[{"email":"a@x.com","name":"A"},{"username":"b"},{"email":""},{"email":["c@x.com","d@x.com"]}],"total":4}"#,
        )
        .expect("parse payload");
        assert_eq!(
            payload.into_emails(),
            vec![
                "a@x.com".to_string(),
                "c@x.com".to_string(),
                "d@x.com".to_string()
            ]
        );
    }

    #[test]
    fn test_null_entries() {
        let payload: SearchResponse =
            serde_json::from_str(r#"{"entries":null,"success":true}"#).expect("parse payload");
        assert!(payload.into_emails().is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = DehashedCredentials {
            username: Some("analyst".to_string()),
            api_key: Some("secret".to_string()),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("analyst"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_blank_credentials_unusable() {
        let creds = DehashedCredentials {
            username: Some("analyst".to_string()),
            api_key: Some("  ".to_string()),
        };
        assert!(creds.usable().is_none());
    }
}
