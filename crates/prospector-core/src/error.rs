//! Core error types for Prospector.
//!
//! Configuration problems are surfaced to the caller before any work starts;
//! the other crates define their own error enums.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A value required to run was not configured
    #[error("missing required config value: {field}")]
    MissingValue {
        /// Field name
        field: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            field: "email_format".to_string(),
            reason: "must be between 1 and 4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for email_format: must be between 1 and 4"
        );

        let err = ConfigError::MissingValue {
            field: "browser.executable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required config value: browser.executable"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
