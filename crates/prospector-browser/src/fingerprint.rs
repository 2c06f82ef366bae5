use rand::seq::SliceRandom;
use std::fs;
use std::path::Path;

/// User agent used when no candidate list can be read.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Scripts that hide the usual automation tells from page JavaScript.
const MASKING_DIRECTIVES: [&str; 4] = [
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });",
    "window.navigator.chrome = { runtime: {} };",
    "Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });",
    "Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3, 4, 5] });",
];

/// Browsing identity for one harvest session.
///
/// The masking directives must be installed on the page before its first
/// navigation; they then run in every new document of that page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvasionProfile {
    pub user_agent: String,
    pub masking_directives: Vec<String>,
}

impl EvasionProfile {
    /// Pick one of `user_agents` uniformly at random.
    ///
    /// An empty list falls back to [`DEFAULT_USER_AGENT`].
    pub fn from_user_agents(user_agents: &[String]) -> Self {
        let user_agent = user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            user_agent,
            masking_directives: MASKING_DIRECTIVES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Profile built from the optional user-agent file.
    pub fn randomized(user_agents_file: Option<&Path>) -> Self {
        Self::from_user_agents(&load_user_agents(user_agents_file))
    }
}

/// Read candidate user agents, one per line.
///
/// A missing, unreadable or empty source is not an error: the single
/// built-in default is returned instead.
pub fn load_user_agents(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return vec![DEFAULT_USER_AGENT.to_string()];
    };

    match fs::read_to_string(path) {
        Ok(contents) => {
            let agents: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect();

            if agents.is_empty() {
                tracing::warn!("User agent file {} is empty, using default", path.display());
                vec![DEFAULT_USER_AGENT.to_string()]
            } else {
                tracing::debug!("Loaded {} user agents from {}", agents.len(), path.display());
                agents
            }
        }
        Err(e) => {
            tracing::warn!(
                "Could not read user agent file {}: {}, using default",
                path.display(),
                e
            );
            vec![DEFAULT_USER_AGENT.to_string()]
        }
    }
}
