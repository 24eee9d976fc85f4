use rand::Rng;
use std::time::Duration;

/// Randomized exponential backoff ("full jitter").
///
/// Retry `n` (0 for the first retry) sleeps a uniformly drawn duration in
/// `[0, min(max, multiplier * 2^n))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitteredBackoff {
    multiplier: f64,
    max: Duration,
}

impl JitteredBackoff {
    pub fn new(multiplier: f64, max: Duration) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        Self { multiplier, max }
    }

    /// Exclusive ceiling of the draw for retry `attempt`.
    pub fn upper_bound(&self, attempt: u32) -> Duration {
        let exp = 2f64.powi(attempt.min(62) as i32) * self.multiplier;
        let max_secs = self.max.as_secs_f64();
        Duration::from_secs_f64(exp.min(max_secs))
    }

    pub fn delay<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let upper = self.upper_bound(attempt).as_secs_f64();
        if upper <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rng.gen_range(0.0..upper))
    }
}
