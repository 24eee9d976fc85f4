//! # Resilience Primitives Module
//!
//! Building blocks for the retry loop in [`crate::client::execution`].
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`backoff`] | Randomized exponential backoff for transient failures |
//! | [`rate_limit`] | Reading the provider's `X-RateLimit-Reset` signal |
//! | [`clock`] | Injectable time source and sleep function |
//!
//! ## Backoff
//!
//! ```rust
//! use braze_client::resilience::backoff::JitteredBackoff;
//! use std::time::Duration;
//!
//! let backoff = JitteredBackoff::new(1.0, Duration::from_millis(1250));
//! // The first retry draws below 2^0 s; later ones are capped at 1.25s.
//! assert_eq!(backoff.upper_bound(0), Duration::from_secs(1));
//! assert_eq!(backoff.upper_bound(1), Duration::from_millis(1250));
//! let delay = backoff.delay(0, &mut rand::thread_rng());
//! assert!(delay < Duration::from_secs(1));
//! ```
//!
//! ## Rate limit signal
//!
//! ```rust
//! use braze_client::resilience::rate_limit::RateLimitSignal;
//! use std::time::Duration;
//!
//! let signal = RateLimitSignal::new(1_000.05);
//! let wait = signal.wait_within(1_000.0, Duration::from_millis(1250));
//! assert!(wait.is_some());
//! ```

pub mod backoff;
pub mod clock;
pub mod rate_limit;

pub use backoff::JitteredBackoff;
pub use clock::{Clock, NoopSleeper, Sleeper, SystemClock, ThreadSleeper};
pub use rate_limit::RateLimitSignal;
