//! Configuration management for Prospector.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. API credentials are only ever taken from
//! the environment.

use crate::convention::EmailConvention;
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/prospector/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Organization and domain to investigate
    pub target: TargetConfig,
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Search engine interaction settings
    pub search: SearchConfig,
    /// Contact-intelligence API settings
    pub lookup: LookupConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PROSPECTOR_ORGANIZATION`, `PROSPECTOR_DOMAIN`, `PROSPECTOR_EMAIL_FORMAT`
    /// - `PROSPECTOR_BROWSER_PATH`, `PROSPECTOR_HEADLESS`, `PROSPECTOR_USER_AGENTS`
    /// - `PROSPECTOR_DEHASHED_USERNAME`, `PROSPECTOR_DEHASHED_API_KEY`
    /// - `PROSPECTOR_HUNTER_API_KEY`
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable source such as the process environment.
    ///
    /// Empty values are ignored. A value that fails to parse is an
    /// `InvalidValue` error and leaves the configuration untouched from that
    /// variable on.
    pub fn apply_overrides<F>(&mut self, var: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        if let Some(val) = var("PROSPECTOR_ORGANIZATION") {
            self.target.organization = val;
        }
        if let Some(val) = var("PROSPECTOR_DOMAIN") {
            self.target.domain = val;
        }
        if let Some(val) = var("PROSPECTOR_EMAIL_FORMAT") {
            self.target.email_format =
                val.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "email_format".to_string(),
                        reason: format!("PROSPECTOR_EMAIL_FORMAT={val} is not a convention key 1-4"),
                    })?;
        }
        if let Some(val) = var("PROSPECTOR_BROWSER_PATH") {
            self.browser.executable = Some(PathBuf::from(val));
        }
        if let Some(val) = var("PROSPECTOR_HEADLESS") {
            let headless = val.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "browser.headless".to_string(),
                reason: format!("PROSPECTOR_HEADLESS={val} is not true or false"),
            })?;
            self.browser.headless = headless;
            tracing::debug!("Override browser.headless from env: {}", headless);
        }
        if let Some(val) = var("PROSPECTOR_USER_AGENTS") {
            self.browser.user_agents_file = Some(PathBuf::from(val));
        }
        if let Some(val) = var("PROSPECTOR_DEHASHED_USERNAME") {
            self.lookup.dehashed.username = Some(val);
        }
        if let Some(val) = var("PROSPECTOR_DEHASHED_API_KEY") {
            self.lookup.dehashed.api_key = Some(val);
        }
        if let Some(val) = var("PROSPECTOR_HUNTER_API_KEY") {
            self.lookup.hunter.api_key = Some(val);
        }
        Ok(())
    }

    /// Check the values that must be right before a run starts.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target.organization.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                field: "target.organization".to_string(),
            });
        }
        if self.target.domain.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                field: "target.domain".to_string(),
            });
        }
        EmailConvention::from_key(self.target.email_format)?;

        match &self.browser.executable {
            Some(path) if !path.as_os_str().is_empty() => {}
            _ => {
                return Err(ConfigError::MissingValue {
                    field: "browser.executable".to_string(),
                })
            }
        }

        self.search.page_pause.validate("search.page_pause")?;
        self.search.scroll_pause.validate("search.scroll_pause")?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/prospector/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "prospector", "prospector")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// The organization under investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Organization name as it appears on profiles
    pub organization: String,
    /// Mail domain used for synthesis and lookups
    pub domain: String,
    /// Email convention key (1-4)
    pub email_format: u8,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            domain: String::new(),
            email_format: 1,
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Chrome/Chromium executable
    pub executable: Option<PathBuf>,
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// File with one user agent per line
    pub user_agents_file: Option<PathBuf>,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agents_file: None,
            navigation_timeout_secs: 30,
        }
    }
}

/// Inclusive range for randomized pauses, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseRange {
    /// Lower bound
    pub min_ms: u64,
    /// Upper bound
    pub max_ms: u64,
}

impl PauseRange {
    /// Range between two whole-second bounds.
    #[must_use]
    pub const fn secs(min: u64, max: u64) -> Self {
        Self {
            min_ms: min * 1000,
            max_ms: max * 1000,
        }
    }

    /// Lower bound as a duration.
    #[must_use]
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    /// Upper bound as a duration.
    #[must_use]
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    fn validate(&self, field: &str) -> ConfigResult<()> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("min_ms {} exceeds max_ms {}", self.min_ms, self.max_ms),
            });
        }
        Ok(())
    }
}

/// Search engine interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search engine landing page
    pub engine_url: String,
    /// Professional network whose profile pages are searched
    pub network_domain: String,
    /// Query input element
    pub query_input_selector: String,
    /// Result headings
    pub result_selector: String,
    /// "Next results" control
    pub next_selector: String,
    /// Marker of a bot-verification challenge
    pub challenge_selector: String,
    /// Bounded wait for the next control, in milliseconds
    pub next_wait_ms: u64,
    /// Pause after navigation and after each page change
    pub page_pause: PauseRange,
    /// Pause between scroll steps
    pub scroll_pause: PauseRange,
    /// Upper bound on scroll steps per page
    pub max_scroll_rounds: u32,
    /// Upper bound on result pages per session
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine_url: "https://www.google.com".to_string(),
            network_domain: "linkedin.com".to_string(),
            query_input_selector: "textarea[name='q'], input[name='q']".to_string(),
            result_selector: "h3".to_string(),
            next_selector: "a#pnnext".to_string(),
            challenge_selector: "iframe[src*='recaptcha']".to_string(),
            next_wait_ms: 10_000,
            page_pause: PauseRange::secs(3, 6),
            scroll_pause: PauseRange::secs(1, 3),
            max_scroll_rounds: 20,
            max_pages: 50,
        }
    }
}

/// Contact-intelligence API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Run both lookup clients at the same time
    pub concurrent: bool,
    /// Dehashed-style bulk search
    pub dehashed: DehashedConfig,
    /// Hunter-style paginated domain search
    pub hunter: HunterConfig,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            concurrent: true,
            dehashed: DehashedConfig::default(),
            hunter: HunterConfig::default(),
        }
    }
}

/// Bulk search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DehashedConfig {
    /// API base URL
    pub base_url: String,
    /// Maximum entries requested in the single query
    pub size_cap: u32,
    /// Account username (environment only)
    #[serde(skip)]
    pub username: Option<String>,
    /// API key (environment only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for DehashedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dehashed.com".to_string(),
            size_cap: 10_000,
            username: None,
            api_key: None,
        }
    }
}

/// Paginated domain search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    /// API base URL
    pub base_url: String,
    /// Emails requested per page
    pub page_size: u32,
    /// Upper bound on pages per lookup
    pub max_pages: u32,
    /// API key (environment only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hunter.io/v2".to_string(),
            page_size: 100,
            max_pages: 100,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn runnable() -> AppConfig {
        let mut config = AppConfig::default();
        config.target.organization = "Acme Corp".to_string();
        config.target.domain = "acme.com".to_string();
        config.browser.executable = Some(PathBuf::from("/usr/bin/chromium"));
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.target.email_format, 1);
        assert!(config.browser.headless);
        assert_eq!(config.search.next_wait_ms, 10_000);
        assert_eq!(config.search.page_pause, PauseRange::secs(3, 6));
        assert_eq!(config.search.scroll_pause, PauseRange::secs(1, 3));
        assert_eq!(config.lookup.dehashed.size_cap, 10_000);
        assert_eq!(config.lookup.hunter.page_size, 100);
        assert!(config.lookup.concurrent);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[target]
organization = "Initech"
domain = "initech.com"
email_format = 3

[search]
max_pages = 5
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.target.organization, "Initech");
        assert_eq!(config.target.email_format, 3);
        assert_eq!(config.search.max_pages, 5);
        // These should be defaults
        assert_eq!(config.search.result_selector, "h3");
        assert_eq!(config.lookup.timeout_secs, 30);
    }

    #[test]
    fn test_credentials_never_read_from_file() {
        let toml_str = r#"
[lookup.hunter]
api_key = "from-file"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse config");
        assert!(config.lookup.hunter.api_key.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[browser]\nexecutable = \"/opt/chrome\"\nheadless = false\n",
        )
        .expect("write config file");

        let config = AppConfig::load_from(&path).expect("load config");
        assert_eq!(config.browser.executable, Some(PathBuf::from("/opt/chrome")));
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[target\norganization = ").expect("write config file");

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PROSPECTOR_ORGANIZATION", "Globex"),
            ("PROSPECTOR_EMAIL_FORMAT", "4"),
            ("PROSPECTOR_HEADLESS", "false"),
            ("PROSPECTOR_HUNTER_API_KEY", "hk"),
            ("PROSPECTOR_DEHASHED_USERNAME", ""),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(ToString::to_string))
            .expect("valid overrides");

        assert_eq!(config.target.organization, "Globex");
        assert_eq!(config.target.email_format, 4);
        assert!(!config.browser.headless);
        assert_eq!(config.lookup.hunter.api_key.as_deref(), Some("hk"));
        assert!(config.lookup.dehashed.username.is_none());
    }

    #[test]
    fn test_unparseable_convention_override_fails() {
        for raw in ["256", "-1", "two"] {
            let mut config = runnable();
            let err = config
                .apply_overrides(|name| {
                    (name == "PROSPECTOR_EMAIL_FORMAT").then(|| raw.to_string())
                })
                .unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { field, .. } if field == "email_format"),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_convention_override_fails_validation() {
        let mut config = runnable();
        config
            .apply_overrides(|name| (name == "PROSPECTOR_EMAIL_FORMAT").then(|| "9".to_string()))
            .expect("numeric override");
        assert_eq!(config.target.email_format, 9);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unparseable_headless_override_fails() {
        let mut config = runnable();
        let err = config
            .apply_overrides(|name| (name == "PROSPECTOR_HEADLESS").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_accepts_runnable_config() {
        assert!(runnable().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_convention() {
        let mut config = runnable();
        config.target.email_format = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_requires_browser_path() {
        let mut config = runnable();
        config.browser.executable = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingValue { field }) if field == "browser.executable"
        ));

        config.browser.executable = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pause() {
        let mut config = runnable();
        config.search.scroll_pause = PauseRange {
            min_ms: 3000,
            max_ms: 1000,
        };
        assert!(config.validate().is_err());
    }
}
