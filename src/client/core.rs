use crate::client::builder::BrazeClientBuilder;
use crate::client::credential::Credential;
use crate::client::endpoint::Endpoint;
use crate::client::execution::RequestExecutor;
use crate::client::payload::{self, Records, UserDelete, UserTrack};
use crate::client::policy::RetryPolicy;
use crate::client::response::{normalize, NormalizedResult};
use crate::Result;
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};

pub const DEFAULT_API_URL: &str = "https://rest.iad-02.braze.com";
pub const LEGACY_APPBOY_API_URL: &str = "https://api.appboy.com";

/// Client for the Braze user REST API.
///
/// Every call returns a [`NormalizedResult`]; transport failures, rate limits
/// and malformed bodies end up in its `errors` list rather than as `Err`.
/// The client holds only immutable state and can be shared across threads.
pub struct BrazeClient {
    credential: Credential,
    base_url: String,
    executor: RequestExecutor,
}

impl BrazeClient {
    /// Client with an API key and everything else at defaults (or from the environment).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        BrazeClientBuilder::new().api_key(api_key).build()
    }

    pub fn builder() -> BrazeClientBuilder {
        BrazeClientBuilder::new()
    }

    pub(crate) fn from_parts(
        credential: Credential,
        base_url: String,
        executor: RequestExecutor,
    ) -> Self {
        Self {
            credential,
            base_url,
            executor,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.executor.policy()
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Record user attributes, custom events and purchases.
    ///
    /// Each section is optional; `None` or empty sections are not sent.
    pub fn track(
        &self,
        attributes: Option<Records>,
        events: Option<Records>,
        purchases: Option<Records>,
    ) -> NormalizedResult {
        self.send_track(&UserTrack {
            attributes,
            events,
            purchases,
        })
    }

    pub fn send_track(&self, payload: &UserTrack) -> NormalizedResult {
        self.dispatch(Endpoint::UsersTrack, payload)
    }

    /// Delete users by external id and/or Braze (Appboy) id.
    pub fn delete(
        &self,
        external_ids: Option<Vec<String>>,
        appboy_ids: Option<Vec<String>>,
    ) -> NormalizedResult {
        self.send_delete(&UserDelete {
            external_ids,
            appboy_ids,
        })
    }

    pub fn send_delete(&self, payload: &UserDelete) -> NormalizedResult {
        self.dispatch(Endpoint::UsersDelete, payload)
    }

    fn dispatch<P: Serialize>(&self, endpoint: Endpoint, payload: &P) -> NormalizedResult {
        let body = match payload::with_credential(payload, &self.credential) {
            Ok(body) => body,
            Err(e) => {
                error!(
                    endpoint = endpoint.path(),
                    error = %e,
                    "braze payload could not be serialized"
                );
                return NormalizedResult::from_error(&e);
            }
        };

        let url = endpoint.url(&self.base_url);
        let start = Instant::now();
        let (outcome, state) = self.executor.send_with_state(&url, &body);
        let result = normalize(&outcome);

        info!(
            call_id = state.call_id.as_str(),
            endpoint = endpoint.path(),
            http_status = result.status_code,
            success = result.success,
            attempts = state.attempts,
            waited_ms = state.total_wait.as_millis() as u64,
            duration_ms = start.elapsed().as_millis() as u64,
            "braze request completed"
        );
        result
    }
}
