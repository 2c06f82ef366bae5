use crate::actions::{BrowserActions, ContextLauncher};
use crate::error::{BrowserError, Result};
use crate::fingerprint::EvasionProfile;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Interval between element probes while waiting for a selector.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome switches applied to every session. `--enable-automation` must
/// never be added here.
const LAUNCH_ARGS: [&str; 4] = [
    "--disable-blink-features=AutomationControlled",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--no-first-run",
];

/// Headless sessions use Chrome's new headless mode, not the legacy one.
fn headless_mode(headless: bool) -> HeadlessMode {
    if headless {
        HeadlessMode::New
    } else {
        HeadlessMode::False
    }
}

/// One Chrome process with a single page, owned by one harvest session.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl BrowserEngine {
    /// Launch Chrome and open a page with the profile's directives installed.
    pub async fn launch(
        executable: &Path,
        profile: &EvasionProfile,
        launcher: &ChromeLauncher,
    ) -> Result<Self> {
        if !executable.exists() {
            return Err(BrowserError::LaunchError(format!(
                "browser executable not found at {}",
                executable.display()
            )));
        }

        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable)
            .disable_default_args()
            .no_sandbox()
            .window_size(launcher.window_width, launcher.window_height)
            .viewport(Viewport {
                width: launcher.window_width,
                height: launcher.window_height,
                ..Viewport::default()
            })
            .request_timeout(launcher.navigation_timeout)
            .arg(format!("--user-agent={}", profile.user_agent));

        for arg in LAUNCH_ARGS {
            builder = builder.arg(arg);
        }
        builder = builder.headless_mode(headless_mode(launcher.headless));

        let config = builder.build().map_err(BrowserError::LaunchError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::LaunchError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(BrowserError::LaunchError(e.to_string()));
            }
        };

        let mut engine = Self {
            browser,
            page,
            handler,
            closed: false,
        };

        if let Err(e) = engine.install_directives(profile).await {
            let _ = engine.close().await;
            return Err(e);
        }

        Ok(engine)
    }

    async fn install_directives(&self, profile: &EvasionProfile) -> Result<()> {
        for script in &profile.masking_directives {
            self.page
                .execute(AddScriptToEvaluateOnNewDocumentParams::new(script.clone()))
                .await?;
        }
        tracing::debug!(
            "installed {} masking directives",
            profile.masking_directives.len()
        );
        Ok(())
    }

    async fn element(&self, selector: &str) -> Result<chromiumoxide::Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        self.element(selector)
            .await?
            .click()
            .await?
            .type_str(value)
            .await?;
        Ok(())
    }

    async fn submit_field(&self, selector: &str) -> Result<()> {
        self.element(selector).await?.press_key("Enter").await?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.element(selector).await?.click().await?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                if element.clickable_point().await.is_ok() {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "{selector} not clickable after {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        Ok(!self.page.find_elements(selector).await?.is_empty())
    }

    async fn extract_texts(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.page.find_elements(selector).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(text) = element.inner_text().await? {
                texts.push(text);
            }
        }
        Ok(texts)
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let closed = self.browser.close().await;
        let waited = self.browser.wait().await;
        self.handler.abort();

        closed?;
        waited.map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }
}

impl Drop for BrowserEngine {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Launches [`BrowserEngine`] contexts with fixed window settings.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub navigation_timeout: Duration,
}

impl ChromeLauncher {
    pub fn from_config(config: &prospector_core::BrowserConfig) -> Self {
        Self {
            headless: config.headless,
            window_width: config.window_width,
            window_height: config.window_height,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        }
    }
}

impl Default for ChromeLauncher {
    fn default() -> Self {
        Self::from_config(&prospector_core::BrowserConfig::default())
    }
}

#[async_trait::async_trait]
impl ContextLauncher for ChromeLauncher {
    type Context = BrowserEngine;

    async fn launch(&self, executable: &Path, profile: &EvasionProfile) -> Result<BrowserEngine> {
        BrowserEngine::launch(executable, profile, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_from_config() {
        let mut config = prospector_core::BrowserConfig::default();
        config.headless = false;
        config.navigation_timeout_secs = 12;

        let launcher = ChromeLauncher::from_config(&config);
        assert!(!launcher.headless);
        assert_eq!((launcher.window_width, launcher.window_height), (1920, 1080));
        assert_eq!(launcher.navigation_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_launch_args_keep_automation_hidden() {
        assert!(LAUNCH_ARGS.contains(&"--disable-blink-features=AutomationControlled"));
        assert!(!LAUNCH_ARGS.iter().any(|arg| arg.contains("enable-automation")));
    }

    #[test]
    fn test_headless_uses_new_mode() {
        assert!(matches!(headless_mode(true), HeadlessMode::New));
        assert!(matches!(headless_mode(false), HeadlessMode::False));
    }

    #[tokio::test]
    async fn test_launch_rejects_missing_executable() {
        let profile = EvasionProfile::from_user_agents(&[]);
        let result = ChromeLauncher::default()
            .launch(Path::new("/nonexistent/chrome"), &profile)
            .await;
        assert!(matches!(result, Err(BrowserError::LaunchError(_))));
    }
}
