use reqwest::header::HeaderMap;
use std::time::Duration;

/// Header carrying the epoch second at which the provider accepts requests again.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Reset point derived from a 429 response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitSignal {
    pub reset_epoch_secs: f64,
}

impl RateLimitSignal {
    pub fn new(reset_epoch_secs: f64) -> Self {
        Self { reset_epoch_secs }
    }

    /// Missing or unparsable reset headers read as epoch 0, i.e. retry at once.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let reset = headers
            .get(RATE_LIMIT_RESET_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        Self::new(reset)
    }

    /// Signed distance from `now` to the reset point. Negative when already past.
    pub fn seconds_to_reset(&self, now_epoch_secs: f64) -> f64 {
        self.reset_epoch_secs - now_epoch_secs
    }

    /// The wait to honor before retrying, or `None` when the provider wants us to
    /// hold off for `max_wait` or longer.
    pub fn wait_within(&self, now_epoch_secs: f64, max_wait: Duration) -> Option<Duration> {
        let secs = self.seconds_to_reset(now_epoch_secs);
        if secs < max_wait.as_secs_f64() {
            Some(Duration::from_secs_f64(secs.max(0.0)))
        } else {
            None
        }
    }
}
