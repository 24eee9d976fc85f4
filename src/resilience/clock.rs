use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock source used to compare against provider reset timestamps.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch, fractional.
    fn now_epoch_secs(&self) -> f64;
}

/// Blocking wait between attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> f64 {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Sleeps on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Skips every wait. Retry decisions are still made, only the delay is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep(&self, _duration: Duration) {}
}
