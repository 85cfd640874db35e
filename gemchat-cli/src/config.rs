use std::time::Duration;

use gemchat_store::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimiter};
use gemchat_utils::env::{env_bool, env_u64};

/// Front-end settings read from the environment (after `.env` is loaded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
    pub probe_on_start: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let max_requests = env_u64(
            "GEMCHAT_RATELIMIT_MAX_REQUESTS",
            DEFAULT_MAX_REQUESTS as u64,
        );
        let window_ms = env_u64(
            "GEMCHAT_RATELIMIT_WINDOW_MS",
            DEFAULT_WINDOW.as_millis() as u64,
        );

        Self {
            rate_limit_max_requests: usize::try_from(max_requests).unwrap_or(DEFAULT_MAX_REQUESTS),
            rate_limit_window: Duration::from_millis(window_ms),
            probe_on_start: env_bool("GEMCHAT_PROBE_ON_START", true),
        }
    }

    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.rate_limit_max_requests, self.rate_limit_window)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            rate_limit_window: DEFAULT_WINDOW,
            probe_on_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::AppConfig;

    #[test]
    fn defaults_follow_limiter_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.rate_limit_max_requests, 10);
        assert_eq!(config.rate_limit_window, Duration::from_secs(60));

        let limiter = config.rate_limiter();
        assert_eq!(limiter.max_requests(), 10);
        assert_eq!(limiter.window(), Duration::from_secs(60));
    }
}
