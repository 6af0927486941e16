// src/pipeline/pacing.rs

//! Inter-request pacing.
//!
//! Spreads successive API calls apart, optionally with randomized
//! jitter so the request timing is not perfectly predictable. The wait
//! is a cooperative async sleep; the executor stays free to run other
//! work for its whole duration.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::models::AdditionalOptions;

/// Jitter ceiling in milliseconds when jitter is enabled without an
/// explicit bound. A configured bound of zero also falls back here,
/// matching the treatment of zero as "unset" elsewhere.
const DEFAULT_MAX_JITTER_MS: u64 = 500;

/// Pacing policy for the items of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    delay_ms: u64,
    jitter: bool,
    max_jitter_ms: u64,
}

impl Pacing {
    pub fn new(delay_ms: u64, jitter: bool, max_jitter_ms: Option<u64>) -> Self {
        Self {
            delay_ms,
            jitter,
            max_jitter_ms: max_jitter_ms
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_JITTER_MS),
        }
    }

    pub fn from_options(extra: &AdditionalOptions) -> Self {
        Self::new(extra.request_delay_ms, extra.jitter, extra.max_jitter_ms)
    }

    /// Delay to apply before the item at `index`, if any.
    ///
    /// The first item never waits, regardless of configuration. Jitter
    /// adds a uniformly random extra delay in `[0, max_jitter_ms)`.
    pub fn duration_before(&self, index: usize) -> Option<Duration> {
        if index == 0 || self.delay_ms == 0 {
            return None;
        }

        let mut total = self.delay_ms;
        if self.jitter {
            total += rand::thread_rng().gen_range(0..self.max_jitter_ms);
        }
        Some(Duration::from_millis(total))
    }

    /// Suspend before the item at `index`.
    pub async fn pause_before(&self, index: usize) {
        if let Some(delay) = self.duration_before(index) {
            log::debug!("Waiting {}ms before request {}", delay.as_millis(), index + 1);
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn first_item_never_waits() {
        let pacing = Pacing::new(200, true, Some(500));
        assert_eq!(pacing.duration_before(0), None);
    }

    #[test]
    fn zero_delay_never_waits() {
        let pacing = Pacing::new(0, true, Some(500));
        assert_eq!(pacing.duration_before(1), None);
        assert_eq!(pacing.duration_before(7), None);
    }

    #[test]
    fn fixed_delay_without_jitter_is_exact() {
        let pacing = Pacing::new(200, false, None);
        assert_eq!(pacing.duration_before(1), Some(Duration::from_millis(200)));
        assert_eq!(pacing.duration_before(9), Some(Duration::from_millis(200)));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let pacing = Pacing::new(200, true, Some(500));
        for _ in 0..100 {
            let delay = pacing.duration_before(1).unwrap();
            assert!(delay >= Duration::from_millis(200));
            assert!(delay < Duration::from_millis(700));
        }
    }

    #[test]
    fn unset_and_zero_jitter_bounds_fall_back_to_default() {
        for max_jitter in [None, Some(0)] {
            let pacing = Pacing::new(100, true, max_jitter);
            for _ in 0..100 {
                let delay = pacing.duration_before(1).unwrap();
                assert!(delay >= Duration::from_millis(100));
                assert!(delay < Duration::from_millis(100 + DEFAULT_MAX_JITTER_MS));
            }
        }
    }

    #[tokio::test]
    async fn pause_suspends_for_the_configured_delay() {
        let pacing = Pacing::new(50, false, None);

        let start = Instant::now();
        pacing.pause_before(0).await;
        assert!(start.elapsed() < Duration::from_millis(40));

        let start = Instant::now();
        pacing.pause_before(1).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
