//! Search harvester.
//!
//! Drives one search session per call: land on the engine, clear a
//! challenge if one is shown, submit the profile query, then walk result
//! pages collecting heading texts until the "next" control disappears.

use crate::captcha::CaptchaGate;
use crate::error::{HarvestError, Result};
use crate::pacing::{Pacer, TokioPacer};
use crate::session::{HarvestReport, SearchSession, SessionState};
use prospector_browser::{BrowserActions, BrowserError, ContextLauncher, EvasionProfile};
use prospector_core::SearchConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;

/// Scrolls the window to the bottom of the document.
pub const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// Current document height.
pub const HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Build the profile search query for an organization.
pub fn build_query(network_domain: &str, organization: &str) -> String {
    format!("site:{network_domain}/in/ \"{organization}\"")
}

/// Harvests candidate contact names from search-engine result titles.
pub struct Harvester<L: ContextLauncher> {
    launcher: L,
    gate: CaptchaGate,
    pacer: Arc<dyn Pacer>,
    config: SearchConfig,
}

impl<L: ContextLauncher> Harvester<L> {
    pub fn new(launcher: L, gate: CaptchaGate, config: SearchConfig) -> Self {
        Self {
            launcher,
            gate,
            pacer: Arc::new(TokioPacer),
            config,
        }
    }

    /// Replace the time source used for every pause.
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Run one search session for `organization`.
    ///
    /// Only a missing browser path or a failed launch is an error. An
    /// unsolved challenge yields an empty, aborted report; a driver fault
    /// mid-session yields a `Failed` report holding the names collected so
    /// far. The browsing context is closed on every path.
    pub async fn harvest(
        &self,
        organization: &str,
        browser_path: &Path,
        profile: &EvasionProfile,
    ) -> Result<HarvestReport> {
        if browser_path.as_os_str().is_empty() {
            return Err(HarvestError::MissingBrowserPath);
        }

        let mut session = SearchSession::new(build_query(&self.config.network_domain, organization));
        let span = tracing::info_span!("harvest", session = %session.id, organization);

        async {
            tracing::info!("Starting harvest for {}", organization);

            let mut context = self
                .launcher
                .launch(browser_path, profile)
                .await
                .map_err(HarvestError::Launch)?;

            if let Err(e) = self.drive(&mut session, &context).await {
                tracing::warn!(page = session.current_page, "Harvest interrupted: {}", e);
                session.fail(e.to_string());
            }

            if let Err(e) = context.close().await {
                tracing::warn!("Failed to close browsing context: {}", e);
            }

            let report = session.into_report();
            tracing::info!(
                state = %report.state,
                pages = report.pages_visited,
                "Harvest completed with {} names",
                report.names.len()
            );
            Ok::<_, HarvestError>(report)
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &self,
        session: &mut SearchSession,
        context: &dyn BrowserActions,
    ) -> std::result::Result<(), BrowserError> {
        context.navigate(&self.config.engine_url).await?;
        self.pacer.pause_within(&self.config.page_pause).await;

        if self.gate.is_challenge_present(context).await {
            tracing::info!("Challenge detected, attempting to solve");
            session.transition(SessionState::Challenged);
            if let Err(e) = self.gate.solve(context).await {
                tracing::warn!("Challenge not solved, aborting session: {}", e);
                session.abort(e.to_string());
                return Ok(());
            }
            tracing::info!("Challenge solved");
        }

        context
            .fill_field(&self.config.query_input_selector, &session.query)
            .await?;
        context
            .submit_field(&self.config.query_input_selector)
            .await?;
        self.pacer.pause_within(&self.config.page_pause).await;
        session.transition(SessionState::Paginating);

        loop {
            tracing::debug!(page = session.current_page, "Scraping result page");
            self.scroll_to_bottom(context).await?;

            let titles = context.extract_texts(&self.config.result_selector).await?;
            let added = session.collect(titles);
            tracing::debug!(page = session.current_page, added, "Collected result titles");

            if session.current_page >= self.config.max_pages {
                tracing::info!("Reached page limit of {}", self.config.max_pages);
                break;
            }

            match context
                .wait_for_selector(&self.config.next_selector, self.config.next_wait_ms)
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_absence() => {
                    tracing::debug!("No further result pages: {}", e);
                    break;
                }
                Err(e) => return Err(e),
            }

            context.click(&self.config.next_selector).await?;
            self.pacer.pause_within(&self.config.page_pause).await;
            session.advance_page();
        }

        session.transition(SessionState::Done);
        Ok(())
    }

    /// Scroll until the document height stops changing, at most
    /// `max_scroll_rounds` times. Returns the number of scroll steps taken.
    async fn scroll_to_bottom(
        &self,
        context: &dyn BrowserActions,
    ) -> std::result::Result<u32, BrowserError> {
        let mut last_height = page_height(context).await?;

        for round in 1..=self.config.max_scroll_rounds {
            context.evaluate(SCROLL_SCRIPT).await?;
            self.pacer.pause_within(&self.config.scroll_pause).await;

            let height = page_height(context).await?;
            if height == last_height {
                return Ok(round);
            }
            last_height = height;
        }

        tracing::debug!(
            "Page height still growing after {} scroll rounds",
            self.config.max_scroll_rounds
        );
        Ok(self.config.max_scroll_rounds)
    }
}

async fn page_height(context: &dyn BrowserActions) -> std::result::Result<u64, BrowserError> {
    let value = context.evaluate(HEIGHT_SCRIPT).await?;
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|h| h.max(0.0).round() as u64))
        .ok_or_else(|| BrowserError::ScriptError(format!("unexpected scroll height {value}")))
}
