//! Name-to-email conventions and the email synthesizer.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// A deterministic rule that turns a first/last name pair into a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailConvention {
    /// `jdoe@domain` (key 1)
    InitialLast,
    /// `jane.doe@domain` (key 2)
    FirstDotLast,
    /// `doej@domain` (key 3)
    LastInitial,
    /// `janed@domain` (key 4)
    FirstLastInitial,
}

impl EmailConvention {
    /// All conventions in key order.
    pub const ALL: [Self; 4] = [
        Self::InitialLast,
        Self::FirstDotLast,
        Self::LastInitial,
        Self::FirstLastInitial,
    ];

    /// Resolve a convention from its numeric selector (1-4).
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for any other key.
    pub fn from_key(key: u8) -> ConfigResult<Self> {
        match key {
            1 => Ok(Self::InitialLast),
            2 => Ok(Self::FirstDotLast),
            3 => Ok(Self::LastInitial),
            4 => Ok(Self::FirstLastInitial),
            other => Err(ConfigError::InvalidValue {
                field: "email_format".to_string(),
                reason: format!("unknown convention key {other}, expected 1-4"),
            }),
        }
    }

    /// Numeric selector for this convention.
    #[must_use]
    pub fn key(self) -> u8 {
        match self {
            Self::InitialLast => 1,
            Self::FirstDotLast => 2,
            Self::LastInitial => 3,
            Self::FirstLastInitial => 4,
        }
    }

    /// Compose an address. `first` and `last` must be non-empty.
    #[must_use]
    pub fn compose(self, first: &str, last: &str, domain: &str) -> String {
        match self {
            Self::InitialLast => format!("{}{last}@{domain}", initial(first)),
            Self::FirstDotLast => format!("{first}.{last}@{domain}"),
            Self::LastInitial => format!("{last}{}@{domain}", initial(first)),
            Self::FirstLastInitial => format!("{first}{}@{domain}", initial(last)),
        }
    }
}

fn initial(token: &str) -> &str {
    token
        .char_indices()
        .nth(1)
        .map_or(token, |(end, _)| &token[..end])
}

/// Turn harvested names into candidate addresses.
///
/// Only the first two whitespace-delimited tokens of each name are used,
/// lowercased. Names with fewer than two tokens are skipped. Output keeps
/// input order and is not deduplicated.
///
/// # Errors
/// Fails fast with a configuration error when `convention_key` is not 1-4.
pub fn synthesize(names: &[String], domain: &str, convention_key: u8) -> ConfigResult<Vec<String>> {
    let convention = EmailConvention::from_key(convention_key)?;

    let emails: Vec<String> = names
        .iter()
        .filter_map(|name| {
            let mut tokens = name.split_whitespace();
            let first = tokens.next()?.to_lowercase();
            let last = tokens.next()?.to_lowercase();
            Some(convention.compose(&first, &last, domain))
        })
        .collect();

    tracing::debug!(
        names = names.len(),
        emails = emails.len(),
        convention = ?convention,
        "synthesized candidate emails"
    );

    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_each_convention() {
        let cases = [
            (1, "jdoe@acme.com"),
            (2, "jane.doe@acme.com"),
            (3, "doej@acme.com"),
            (4, "janed@acme.com"),
        ];
        for (key, expected) in cases {
            let emails = synthesize(&names(&["Jane Doe"]), "acme.com", key).expect("valid key");
            assert_eq!(emails, vec![expected.to_string()], "key {key}");
        }
    }

    #[test]
    fn test_invalid_key_fails_fast() {
        for key in [0, 5, 255] {
            let err = synthesize(&names(&["Jane Doe"]), "acme.com", key).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }));
        }
    }

    #[test]
    fn test_single_token_names_are_skipped() {
        let emails = synthesize(&names(&["Madonna", "John Smith", "  "]), "acme.com", 2)
            .expect("valid key");
        assert_eq!(emails, vec!["john.smith@acme.com".to_string()]);
    }

    #[test]
    fn test_only_first_two_tokens_used() {
        let emails = synthesize(
            &names(&["Mary  Ann Smith - Engineer - Acme | LinkedIn"]),
            "acme.com",
            2,
        )
        .expect("valid key");
        assert_eq!(emails, vec!["mary.ann@acme.com".to_string()]);
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        let emails = synthesize(
            &names(&["Bob Stone", "Al Ray", "Bob Stone"]),
            "x.io",
            1,
        )
        .expect("valid key");
        assert_eq!(
            emails,
            vec![
                "bstone@x.io".to_string(),
                "aray@x.io".to_string(),
                "bstone@x.io".to_string()
            ]
        );
    }

    #[test]
    fn test_initial_of_multibyte_name() {
        assert_eq!(
            EmailConvention::InitialLast.compose("élodie", "roux", "x.fr"),
            "éroux@x.fr"
        );
    }

    #[test]
    fn test_key_round_trip() {
        for convention in EmailConvention::ALL {
            assert_eq!(
                EmailConvention::from_key(convention.key()).expect("valid key"),
                convention
            );
        }
    }
}
