//! Shared fixtures: a scripted in-memory transport, a recording sleeper,
//! a frozen clock, and a mockito server wrapper.

#![allow(dead_code)]

use braze_client::resilience::clock::{Clock, Sleeper};
use braze_client::transport::{RawResponse, Transport, TransportError};
use braze_client::{BrazeClient, BrazeClientBuilder};
use mockito::{Mock, Server, ServerGuard};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NOW: f64 = 1_700_000_000.0;

/// One canned reaction of the fake provider.
#[derive(Debug, Clone)]
pub enum Step {
    Respond {
        status: u16,
        headers: Vec<(&'static str, String)>,
        body: String,
    },
    Refuse,
}

impl Step {
    pub fn json(status: u16, body: &str) -> Self {
        Step::Respond {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn rate_limited(reset_epoch_secs: f64) -> Self {
        Step::Respond {
            status: 429,
            headers: vec![("x-ratelimit-reset", reset_epoch_secs.to_string())],
            body: r#"{"message": "rate limited"}"#.to_string(),
        }
    }
}

/// Plays `steps` in order, then repeats `fallback` forever.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>, fallback: Step) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn always(step: Step) -> Arc<Self> {
        Self::new(Vec::new(), step)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match step {
            Step::Refuse => Err(TransportError::Other("connection refused".to_string())),
            Step::Respond {
                status,
                headers,
                body,
            } => {
                let mut map = HeaderMap::new();
                for (name, value) in headers {
                    map.insert(
                        HeaderName::from_static(name),
                        HeaderValue::from_str(&value).unwrap(),
                    );
                }
                Ok(RawResponse::new(status, map, body))
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> f64 {
        self.0
    }
}

/// Client wired to a scripted transport, a frozen clock and a recording sleeper.
pub fn scripted_client(
    transport: Arc<ScriptedTransport>,
    sleeper: Arc<RecordingSleeper>,
) -> BrazeClient {
    BrazeClientBuilder::new()
        .api_key("API_KEY")
        .base_url("https://rest.test.braze.com")
        .max_attempts(3)
        .max_wait(Duration::from_millis(1250))
        .transport(transport)
        .clock(Arc::new(FixedClock(NOW)))
        .sleeper(sleeper)
        .build()
        .expect("client builds")
}

/// Test fixture that manages a mock provider
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server, with waits disabled.
    pub fn client(&self) -> BrazeClient {
        BrazeClientBuilder::new()
            .api_key("API_KEY")
            .base_url(&self.base_url)
            .sleeper(Arc::new(braze_client::resilience::NoopSleeper))
            .build()
            .expect("client builds")
    }

    /// Create a mock for a JSON response on `path`, expected `hits` times.
    pub fn mock_json(&mut self, path: &str, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("content-type", "application/json")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create()
    }
}
