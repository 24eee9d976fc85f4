//! Request execution: the bounded retry loop around a single POST.

use crate::resilience::clock::{Clock, Sleeper, SystemClock, ThreadSleeper};
use crate::resilience::rate_limit::RateLimitSignal;
use crate::transport::{RawResponse, Transport, TransportError};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::policy::{Decision, RetryPolicy};
use super::state::RetryState;

/// Why an attempt may be repeated.
#[derive(Debug)]
pub enum RetryKind {
    Network(TransportError),
    Server { status: u16, body: String },
    /// 429 whose reset is close enough to wait for.
    RateLimited { wait: Duration, seconds_to_reset: f64 },
}

impl RetryKind {
    fn label(&self) -> &'static str {
        match self {
            RetryKind::Network(_) => "network",
            RetryKind::Server { .. } => "server_error",
            RetryKind::RateLimited { .. } => "rate_limited",
        }
    }

    fn into_error(self, max_wait: Duration) -> Error {
        match self {
            RetryKind::Network(e) => Error::Transport(e),
            RetryKind::Server { status, body } => Error::Server { status, body },
            RetryKind::RateLimited {
                seconds_to_reset, ..
            } => Error::RateLimited {
                seconds_to_reset,
                max_wait_secs: max_wait.as_secs_f64(),
            },
        }
    }
}

/// Classified result of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Anything the loop hands back untouched: 2xx and every 4xx except 429.
    Success(RawResponse),
    Retryable(RetryKind),
    Terminal(Error),
}

/// Owns the retry loop. Holds no per-call state; one executor can serve
/// concurrent calls from several threads.
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Classify the result of one POST.
    pub fn classify(
        &self,
        result: std::result::Result<RawResponse, TransportError>,
    ) -> AttemptOutcome {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => return AttemptOutcome::Retryable(RetryKind::Network(e)),
        };

        match resp.status {
            429 => {
                let signal = RateLimitSignal::from_headers(&resp.headers);
                let now = self.clock.now_epoch_secs();
                let seconds_to_reset = signal.seconds_to_reset(now);
                match signal.wait_within(now, self.policy.max_wait()) {
                    Some(wait) => AttemptOutcome::Retryable(RetryKind::RateLimited {
                        wait,
                        seconds_to_reset,
                    }),
                    None => AttemptOutcome::Terminal(Error::RateLimited {
                        seconds_to_reset,
                        max_wait_secs: self.policy.max_wait().as_secs_f64(),
                    }),
                }
            }
            500..=599 => AttemptOutcome::Retryable(RetryKind::Server {
                status: resp.status,
                body: resp.body,
            }),
            _ => AttemptOutcome::Success(resp),
        }
    }

    /// POST `payload` to `url`, retrying per policy.
    pub fn send(&self, url: &str, payload: &serde_json::Value) -> Result<RawResponse> {
        self.send_with_state(url, payload).0
    }

    /// Like [`send`](Self::send), also returning the bookkeeping of the call.
    pub fn send_with_state(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> (Result<RawResponse>, RetryState) {
        let mut state = RetryState::new(Uuid::new_v4().to_string());
        let mut rng = rand::thread_rng();

        loop {
            let attempt = state.begin_attempt();
            let result = self.transport.post_json(url, payload);
            if let Ok(resp) = &result {
                state.observe(resp.status, &resp.headers);
            }

            let kind = match self.classify(result) {
                AttemptOutcome::Success(resp) => return (Ok(resp), state),
                AttemptOutcome::Terminal(err) => {
                    warn!(
                        call_id = state.call_id.as_str(),
                        attempt,
                        error = %err,
                        "braze request failed terminally"
                    );
                    return (Err(err), state);
                }
                AttemptOutcome::Retryable(kind) => kind,
            };

            match self.policy.decide(&kind, attempt, &mut rng) {
                Decision::Retry { delay } => {
                    warn!(
                        call_id = state.call_id.as_str(),
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        kind = kind.label(),
                        delay_ms = delay.as_millis() as u64,
                        "braze request failed, retrying"
                    );
                    self.sleeper.sleep(delay);
                    state.add_wait(delay);
                }
                Decision::Fail => {
                    debug!(
                        call_id = state.call_id.as_str(),
                        attempts = attempt,
                        kind = kind.label(),
                        "braze retry budget exhausted"
                    );
                    return (Err(kind.into_error(self.policy.max_wait())), state);
                }
            }
        }
    }
}
