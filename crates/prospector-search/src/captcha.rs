//! CAPTCHA detection and solving.

use async_trait::async_trait;
use prospector_browser::BrowserActions;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single presence probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Why a challenge could not be cleared.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver cannot clear challenges without a human
    #[error("manual intervention required to solve the challenge")]
    ManualInterventionRequired,

    /// The solver tried and failed
    #[error("challenge solver failed: {0}")]
    Failed(String),
}

/// CAPTCHA solver trait for pluggable implementations.
#[async_trait]
pub trait CaptchaSolver: Send + Sync {
    /// Attempt to clear the challenge shown in `context`.
    async fn solve(&self, context: &dyn BrowserActions) -> Result<(), SolveError>;
}

/// Manual CAPTCHA solver - never clears a challenge, so the session aborts.
pub struct ManualSolver;

#[async_trait]
impl CaptchaSolver for ManualSolver {
    async fn solve(&self, _context: &dyn BrowserActions) -> Result<(), SolveError> {
        Err(SolveError::ManualInterventionRequired)
    }
}

/// Detects a bot-verification challenge and hands it to a solver.
pub struct CaptchaGate {
    challenge_selector: String,
    solver: Box<dyn CaptchaSolver>,
}

impl CaptchaGate {
    /// Create a gate probing for `challenge_selector`.
    pub fn new(challenge_selector: impl Into<String>, solver: Box<dyn CaptchaSolver>) -> Self {
        Self {
            challenge_selector: challenge_selector.into(),
            solver,
        }
    }

    /// Whether the challenge marker is on the page.
    ///
    /// Never fails: probe errors and probe timeouts count as "no challenge".
    pub async fn is_challenge_present(&self, context: &dyn BrowserActions) -> bool {
        match tokio::time::timeout(
            PROBE_TIMEOUT,
            context.element_exists(&self.challenge_selector),
        )
        .await
        {
            Ok(Ok(present)) => present,
            Ok(Err(e)) => {
                tracing::debug!("challenge probe failed, assuming none: {}", e);
                false
            }
            Err(_) => {
                tracing::debug!("challenge probe timed out, assuming none");
                false
            }
        }
    }

    /// Block until the solver clears the challenge or gives up.
    pub async fn solve(&self, context: &dyn BrowserActions) -> Result<(), SolveError> {
        self.solver.solve(context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_solver_is_stateless() {
        assert_eq!(std::mem::size_of::<ManualSolver>(), 0);
    }

    #[test]
    fn test_solve_error_display() {
        assert_eq!(
            SolveError::Failed("audio challenge rejected".to_string()).to_string(),
            "challenge solver failed: audio challenge rejected"
        );
    }
}
