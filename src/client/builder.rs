use crate::client::core::{BrazeClient, DEFAULT_API_URL, LEGACY_APPBOY_API_URL};
use crate::client::credential::Credential;
use crate::client::execution::RequestExecutor;
use crate::client::policy::{
    RetryPolicy, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_WAIT,
};
use crate::resilience::clock::{Clock, Sleeper};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Anything not set explicitly falls back to the environment, then to the
/// built-in defaults:
/// - `BRAZE_API_URL`
/// - `BRAZE_HTTP_TIMEOUT_MS` (default 2000, per attempt)
/// - `BRAZE_MAX_ATTEMPTS` (default 3)
/// - `BRAZE_MAX_WAIT_MS` (default 1250)
/// - `BRAZE_PROXY_URL`
#[derive(Default)]
pub struct BrazeClientBuilder {
    credential: Option<Credential>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_attempts: Option<u32>,
    max_wait: Option<Duration>,
    proxy_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl BrazeClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate with a REST API key (sent as `api_key`).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::api_key(key));
        self
    }

    /// Authenticate against the legacy Appboy endpoint (sent as `app_group_id`).
    ///
    /// Unless a base URL is set, the client then targets the legacy host.
    pub fn app_group_id(mut self, id: impl Into<String>) -> Self {
        self.credential = Some(Credential::app_group_id(id));
        self
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Override the REST endpoint host (e.g. another Braze instance, or a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-attempt HTTP timeout. Ignored when a custom transport is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Total POSTs per call, the first one included. Clamped to at least 1.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = Some(n.max(1));
        self
    }

    /// Longest wait the client blocks for between attempts.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Replace the reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<BrazeClient> {
        self.build_with_env(|key| std::env::var(key).ok())
    }

    pub(crate) fn build_with_env<F>(self, env: F) -> Result<BrazeClient>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = self.credential.ok_or_else(|| {
            Error::configuration_with_context(
                "a credential is required",
                ErrorContext::new()
                    .with_field_path("builder.credential")
                    .with_details("call api_key() or app_group_id()")
                    .with_source("client_builder"),
            )
        })?;
        if credential.secret().trim().is_empty() {
            return Err(Error::configuration_with_context(
                "credential must not be empty",
                ErrorContext::new()
                    .with_field_path(format!("builder.{}", credential.field_name()))
                    .with_source("client_builder"),
            ));
        }

        let default_url = match credential {
            Credential::ApiKey(_) => DEFAULT_API_URL,
            Credential::AppGroupId(_) => LEGACY_APPBOY_API_URL,
        };
        let base_url = self
            .base_url
            .or_else(|| env("BRAZE_API_URL"))
            .unwrap_or_else(|| default_url.to_string());
        let base_url = validate_base_url(&base_url)?;

        let timeout = resolve_timeout(self.timeout, &env);
        let max_wait = self
            .max_wait
            .or_else(|| env_millis(&env, "BRAZE_MAX_WAIT_MS"))
            .unwrap_or(DEFAULT_MAX_WAIT);
        let max_attempts = self
            .max_attempts
            .or_else(|| {
                env("BRAZE_MAX_ATTEMPTS")
                    .and_then(|s| s.trim().parse::<u32>().ok())
            })
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => {
                let proxy = self.proxy_url.or_else(|| env("BRAZE_PROXY_URL"));
                Arc::new(HttpTransport::new(timeout, proxy.as_deref())?)
            }
        };

        let mut executor =
            RequestExecutor::new(transport, RetryPolicy::new(max_attempts, max_wait));
        if let Some(clock) = self.clock {
            executor = executor.with_clock(clock);
        }
        if let Some(sleeper) = self.sleeper {
            executor = executor.with_sleeper(sleeper);
        }

        Ok(BrazeClient::from_parts(credential, base_url, executor))
    }
}

fn env_millis<F>(env: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Per-attempt timeout: explicit setting, then `BRAZE_HTTP_TIMEOUT_MS`, then
/// the default. Zero is treated as unset.
fn resolve_timeout<F>(explicit: Option<Duration>, env: &F) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .or_else(|| env_millis(env, "BRAZE_HTTP_TIMEOUT_MS"))
        .filter(|t| !t.is_zero())
        .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT)
}

fn validate_base_url(raw: &str) -> Result<String> {
    let context = || {
        ErrorContext::new()
            .with_field_path("builder.base_url")
            .with_details(format!("got {:?}", raw))
            .with_source("client_builder")
    };
    let parsed = url::Url::parse(raw.trim()).map_err(|e| {
        Error::configuration_with_context(format!("invalid base URL: {}", e), context())
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            "base URL must use http or https",
            context(),
        ));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}
