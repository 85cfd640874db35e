use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

pub const DEFAULT_MAX_REQUESTS: usize = 10;
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// Sliding-window admission control: at most `max_requests` admissions in any
/// trailing `window`. Rejections take no slot in the window and nothing is queued.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: VecDeque<Instant>,
    rejected: u64,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            timestamps: VecDeque::new(),
            rejected: 0,
        }
    }

    /// Admit or reject one outgoing request at the current instant.
    pub fn try_admit(&mut self) -> bool {
        self.try_admit_at(Instant::now())
    }

    pub fn try_admit_at(&mut self, now: Instant) -> bool {
        self.evict_expired(now);

        if self.timestamps.len() >= self.max_requests {
            self.rejected = self.rejected.saturating_add(1);
            warn!(
                max_requests = self.max_requests,
                window_ms = self.window.as_millis() as u64,
                in_window = self.timestamps.len(),
                rejected_total = self.rejected,
                "rate limit exceeded"
            );
            return false;
        }

        self.timestamps.push_back(now);
        true
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn evict_expired(&mut self, now: Instant) {
        while let Some(oldest) = self.timestamps.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimiter};

    #[test]
    fn defaults_match_documented_limits() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.max_requests(), DEFAULT_MAX_REQUESTS);
        assert_eq!(limiter.window(), DEFAULT_WINDOW);
        assert_eq!(limiter.max_requests(), 10);
        assert_eq!(limiter.window(), Duration::from_secs(60));
    }

    #[test]
    fn admits_exactly_max_requests_within_window() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(3, Duration::from_secs(10));

        for i in 0..3 {
            assert!(limiter.try_admit_at(start + Duration::from_millis(i * 100)));
        }
        assert!(!limiter.try_admit_at(start + Duration::from_secs(1)));
        assert_eq!(limiter.timestamps.len(), 3);
        assert_eq!(limiter.rejected, 1);
    }

    #[test]
    fn window_is_sliding_not_fixed() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(2, Duration::from_secs(10));

        assert!(limiter.try_admit_at(start));
        assert!(limiter.try_admit_at(start + Duration::from_secs(5)));
        assert!(!limiter.try_admit_at(start + Duration::from_secs(9)));

        // Only the first admission has aged out at t=10s.
        assert!(limiter.try_admit_at(start + Duration::from_secs(10)));
        assert!(!limiter.try_admit_at(start + Duration::from_secs(14)));
        assert!(limiter.try_admit_at(start + Duration::from_secs(15)));
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert!(!limiter.try_admit_at(Instant::now()));
        assert_eq!(limiter.timestamps.len(), 0);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(usize::MAX, Duration::from_secs(1));

        assert!(limiter.try_admit_at(start));
        assert!(limiter.try_admit_at(start));
        assert_eq!(limiter.timestamps.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn admits_again_after_window_elapses() {
        let mut limiter = RateLimiter::default();

        for _ in 0..DEFAULT_MAX_REQUESTS {
            assert!(limiter.try_admit());
        }
        assert!(!limiter.try_admit());

        tokio::time::advance(DEFAULT_WINDOW).await;

        assert!(limiter.try_admit());
        assert_eq!(limiter.timestamps.len(), 1);
    }
}
