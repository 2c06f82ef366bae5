use crate::error::Result;
use crate::fingerprint::EvasionProfile;
use std::path::Path;

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Type a value into a form field
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Submit the form owning a field (presses Enter in it)
    async fn submit_field(&self, selector: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait until a selector matches an element that can be clicked (present
    /// and laid out with a visible box), failing with `Timeout` after
    /// `timeout_ms`
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Whether at least one element matches right now
    async fn element_exists(&self, selector: &str) -> Result<bool>;

    /// Text of every matching element, in document order
    async fn extract_texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Evaluate a JavaScript expression and return its JSON value
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Release the browsing context
    async fn close(&mut self) -> Result<()>;
}

/// Source of fresh, exclusively owned browsing contexts.
#[async_trait::async_trait]
pub trait ContextLauncher: Send + Sync {
    type Context: BrowserActions + 'static;

    /// Start a new context using the browser at `executable`, with the
    /// profile's masking directives installed before any navigation.
    async fn launch(&self, executable: &Path, profile: &EvasionProfile) -> Result<Self::Context>;
}
