use reqwest::header::HeaderMap;
use std::time::Duration;

/// Bookkeeping for one logical call across its retries.
///
/// Facts only; the retry decision itself lives in the policy.
#[derive(Debug, Clone, Default)]
pub struct RetryState {
    /// Correlation id attached to every log line of the call.
    pub call_id: String,
    /// Attempts issued so far.
    pub attempts: u32,
    /// Sum of all waits between attempts.
    pub total_wait: Duration,
    pub last_status: Option<u16>,
    pub last_headers: Option<HeaderMap>,
}

impl RetryState {
    pub fn new(call_id: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            ..Self::default()
        }
    }

    pub(crate) fn begin_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    pub(crate) fn observe(&mut self, status: u16, headers: &HeaderMap) {
        self.last_status = Some(status);
        self.last_headers = Some(headers.clone());
    }

    pub(crate) fn add_wait(&mut self, wait: Duration) {
        self.total_wait = self.total_wait.saturating_add(wait);
    }
}
