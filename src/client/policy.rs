use rand::Rng;
use std::time::Duration;

use super::execution::RetryKind;
use crate::resilience::backoff::JitteredBackoff;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Longest single wait the client will block for, both for backoff and for 429 resets.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(1250);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);
const BACKOFF_MULTIPLIER: f64 = 1.0;

/// Internal decision for how to proceed after a retryable attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry budget and wait bounds for one logical call.
///
/// Important constraints:
/// - `max_attempts` counts every POST, the first one included.
/// - Rate-limit retries wait exactly what the provider dictates; backoff only
///   applies to network and server failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    max_wait: Duration,
    backoff: JitteredBackoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, max_wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            max_wait,
            backoff: JitteredBackoff::new(BACKOFF_MULTIPLIER, max_wait),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Decide what to do after a retryable failure.
    ///
    /// `attempts_made` is 1-based: the first failure is decided with `1`, and
    /// its backoff is drawn with exponent 0.
    pub(crate) fn decide<R: Rng + ?Sized>(
        &self,
        kind: &RetryKind,
        attempts_made: u32,
        rng: &mut R,
    ) -> Decision {
        if attempts_made >= self.max_attempts {
            return Decision::Fail;
        }

        let delay = match kind {
            RetryKind::RateLimited { wait, .. } => *wait,
            RetryKind::Network(_) | RetryKind::Server { .. } => {
                self.backoff.delay(attempts_made.saturating_sub(1), rng)
            }
        };
        Decision::Retry { delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_WAIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    fn server_error() -> RetryKind {
        RetryKind::Server {
            status: 503,
            body: String::new(),
        }
    }

    #[test]
    fn test_zero_attempts_is_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_MAX_WAIT).max_attempts(), 1);
    }

    #[test]
    fn test_fails_once_budget_is_spent() {
        let policy = RetryPolicy::default();
        let mut rng = rand::thread_rng();
        assert!(matches!(
            policy.decide(&server_error(), 1, &mut rng),
            Decision::Retry { .. }
        ));
        assert!(matches!(
            policy.decide(&server_error(), 2, &mut rng),
            Decision::Retry { .. }
        ));
        assert_eq!(policy.decide(&server_error(), 3, &mut rng), Decision::Fail);
    }

    #[test]
    fn test_rate_limit_uses_dictated_wait() {
        let policy = RetryPolicy::default();
        let kind = RetryKind::RateLimited {
            wait: Duration::from_millis(50),
            seconds_to_reset: 0.05,
        };
        assert_eq!(
            policy.decide(&kind, 1, &mut rand::thread_rng()),
            Decision::Retry {
                delay: Duration::from_millis(50)
            }
        );
    }

    #[test]
    fn test_first_backoff_stays_under_one_second() {
        let policy = RetryPolicy::default();
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            match policy.decide(&server_error(), 1, &mut rng) {
                Decision::Retry { delay } => assert!(delay < Duration::from_secs(1), "{delay:?}"),
                Decision::Fail => panic!("first failure should retry"),
            }
        }
    }

    #[test]
    fn test_backoff_delay_bounded_by_max_wait() {
        let policy = RetryPolicy::new(10, Duration::from_millis(300));
        let kind = RetryKind::Network(TransportError::Other("connection refused".into()));
        let mut rng = rand::thread_rng();
        for attempt in 1..10 {
            match policy.decide(&kind, attempt, &mut rng) {
                Decision::Retry { delay } => assert!(delay < Duration::from_millis(300)),
                Decision::Fail => panic!("attempt {attempt} should retry"),
            }
        }
    }
}
