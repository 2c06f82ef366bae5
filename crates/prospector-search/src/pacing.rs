//! Randomized pauses between browser actions.
//!
//! All waiting goes through a [`Pacer`] so tests can run a whole session
//! without sleeping.

use async_trait::async_trait;
use prospector_core::PauseRange;
use rand::Rng;
use std::time::Duration;

/// Time source used by the harvester for every deliberate pause.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend for `duration`.
    async fn pause(&self, duration: Duration);

    /// Suspend for a uniformly random duration within `range`.
    async fn pause_within(&self, range: &PauseRange) {
        self.pause(jitter(range)).await;
    }
}

/// Real pacer backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Draw a duration uniformly from `range` (inclusive).
pub fn jitter(range: &PauseRange) -> Duration {
    if range.min_ms >= range.max_ms {
        return range.min();
    }
    Duration::from_millis(rand::thread_rng().gen_range(range.min_ms..=range.max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_within_bounds() {
        let range = PauseRange::secs(3, 6);
        for _ in 0..200 {
            let d = jitter(&range);
            assert!(d >= range.min() && d <= range.max(), "{d:?} out of range");
        }
    }

    #[test]
    fn test_jitter_degenerate_range() {
        let range = PauseRange {
            min_ms: 500,
            max_ms: 500,
        };
        assert_eq!(jitter(&range), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_tokio_pacer_sleeps() {
        let start = tokio::time::Instant::now();
        TokioPacer.pause(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
