//! Search session state and its report.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Where a search session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Landing on the search engine
    Searching,
    /// A bot-verification challenge is being handled
    Challenged,
    /// Walking result pages
    Paginating,
    /// Result pages exhausted
    Done,
    /// Ended by a challenge that could not be cleared or by a driver fault
    Failed,
}

impl SessionState {
    /// Whether the session has reached an end state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One query's walk through the search results.
#[derive(Debug)]
pub struct SearchSession {
    pub id: Uuid,
    pub query: String,
    pub current_page: u32,
    titles: Vec<String>,
    seen: HashSet<String>,
    state: SessionState,
    error: Option<String>,
    aborted: bool,
    reached_results: bool,
}

impl SearchSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            current_page: 1,
            titles: Vec::new(),
            seen: HashSet::new(),
            state: SessionState::Searching,
            error: None,
            aborted: false,
            reached_results: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn transition(&mut self, next: SessionState) {
        if self.state.is_terminal() {
            tracing::debug!("ignoring transition {} -> {}", self.state, next);
            return;
        }
        tracing::debug!(page = self.current_page, "session {} -> {}", self.state, next);
        if next == SessionState::Paginating {
            self.reached_results = true;
        }
        self.state = next;
    }

    /// Add trimmed, non-empty titles not seen before. Returns how many were new.
    pub fn collect<I>(&mut self, titles: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.titles.len();
        for title in titles {
            let title = title.trim();
            if title.is_empty() || self.seen.contains(title) {
                continue;
            }
            self.seen.insert(title.to_string());
            self.titles.push(title.to_string());
        }
        self.titles.len() - before
    }

    pub fn advance_page(&mut self) {
        self.current_page += 1;
    }

    /// Abnormal end that keeps whatever was collected.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
        self.transition(SessionState::Failed);
    }

    /// Total abort: nothing collected survives.
    pub fn abort(&mut self, reason: impl Into<String>) {
        self.titles.clear();
        self.seen.clear();
        self.aborted = true;
        self.fail(reason);
    }

    pub fn into_report(self) -> HarvestReport {
        HarvestReport {
            session_id: self.id,
            names: self.titles,
            state: self.state,
            pages_visited: if self.reached_results && !self.aborted {
                self.current_page
            } else {
                0
            },
            error: self.error,
            aborted: self.aborted,
        }
    }
}

/// What a harvest produced and how it ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestReport {
    pub session_id: Uuid,
    /// Result titles in first-seen order, without duplicates
    pub names: Vec<String>,
    pub state: SessionState,
    pub pages_visited: u32,
    /// Reason for a `Failed` state
    pub error: Option<String>,
    /// The session was abandoned before the query ran
    pub aborted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_collect_dedupes_and_keeps_order() {
        let mut session = SearchSession::new("q");
        assert_eq!(session.collect(owned(&["Jane Doe", "", "  ", "John Roe"])), 2);
        assert_eq!(session.collect(owned(&["John Roe", " Jane Doe ", "Ann Lee"])), 1);
        assert_eq!(session.titles(), owned(&["Jane Doe", "John Roe", "Ann Lee"]).as_slice());
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let mut session = SearchSession::new("q");
        session.transition(SessionState::Paginating);
        session.transition(SessionState::Done);
        session.transition(SessionState::Paginating);
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn test_failure_before_results_visits_no_pages() {
        let mut session = SearchSession::new("q");
        session.fail("net::ERR_TIMED_OUT");

        let report = session.into_report();
        assert_eq!(report.state, SessionState::Failed);
        assert_eq!(report.pages_visited, 0);
        assert!(!report.aborted);
    }

    #[test]
    fn test_fail_keeps_partial_results() {
        let mut session = SearchSession::new("q");
        session.transition(SessionState::Paginating);
        session.collect(owned(&["Jane Doe"]));
        session.fail("target crashed");

        let report = session.into_report();
        assert_eq!(report.state, SessionState::Failed);
        assert_eq!(report.names, owned(&["Jane Doe"]));
        assert_eq!(report.error.as_deref(), Some("target crashed"));
        assert!(!report.aborted);
    }

    #[test]
    fn test_abort_discards_everything() {
        let mut session = SearchSession::new("q");
        session.collect(owned(&["Jane Doe"]));
        session.abort("challenge not solved");

        let report = session.into_report();
        assert_eq!(report.state, SessionState::Failed);
        assert!(report.names.is_empty());
        assert!(report.aborted);
        assert_eq!(report.pages_visited, 0);
    }
}
