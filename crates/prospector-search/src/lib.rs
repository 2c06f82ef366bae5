//! Prospector Search - Search-engine harvesting of candidate contact names.
//!
//! A [`Harvester`] runs one search session per call against a fresh browsing
//! context obtained from a [`prospector_browser::ContextLauncher`]:
//!
//! - **Session** ([`session`]): state machine and first-seen-order title set
//! - **CAPTCHA** ([`captcha`]): one-shot challenge detection and pluggable solving
//! - **Pacing** ([`pacing`]): injectable time source for randomized pauses
//! - **Harvester** ([`harvester`]): navigation, scrolling and pagination
//!
//! The challenge check runs once, right after landing on the search engine.
//! A challenge that appears later, during pagination, is not re-detected.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod captcha;
pub mod error;
#[allow(missing_docs)]
pub mod harvester;
pub mod pacing;
#[allow(missing_docs)]
pub mod session;

pub use captcha::{CaptchaGate, CaptchaSolver, ManualSolver, SolveError};
pub use error::{HarvestError, Result};
pub use harvester::{build_query, Harvester, HEIGHT_SCRIPT, SCROLL_SCRIPT};
pub use pacing::{jitter, Pacer, TokioPacer};
pub use session::{HarvestReport, SearchSession, SessionState};
