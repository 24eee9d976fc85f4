//! Response normalization: every call ends in a [`NormalizedResult`].
//!
//! Rules:
//! - `success` is true only for a completed exchange whose `message` is
//!   `"success"` or `"queued"` and whose provider `errors` list is empty.
//!   Non-fatal provider errors therefore flip `success` to false; they are
//!   still copied into `errors`.
//! - Any other top-level keys of the provider body (`attributes_processed`,
//!   `deleted`, ...) are kept verbatim in `extra`.
//! - Terminal execution errors leave `status_code` at 0 and contribute their
//!   display string to `errors`.
//! - Nothing here retries or reclassifies; the executor already did that.

use crate::transport::RawResponse;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider `message` values that count as accepted.
pub const ACCEPTED_MESSAGES: [&str; 2] = ["success", "queued"];

const RESERVED_KEYS: [&str; 4] = ["success", "status_code", "message", "errors"];

/// The uniform result of a track or delete call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub success: bool,
    /// 0 when no response was ever obtained.
    pub status_code: u16,
    pub message: String,
    pub errors: Vec<String>,
    /// Remaining provider fields, e.g. `attributes_processed` or `deleted`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NormalizedResult {
    pub fn from_response(resp: &RawResponse) -> Self {
        let mut out = NormalizedResult {
            status_code: resp.status,
            ..Default::default()
        };

        let mut map = match resp.json() {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                out.errors.push(
                    Error::MalformedResponse {
                        status: resp.status,
                        message: "expected a JSON object".to_string(),
                    }
                    .to_string(),
                );
                return out;
            }
            Err(e) => {
                out.errors.push(e.to_string());
                return out;
            }
        };

        out.message = match map.remove("message") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let provider_errors = provider_errors(map.remove("errors").as_ref());
        map.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        out.extra = map;
        out.success = ACCEPTED_MESSAGES.contains(&out.message.as_str())
            && provider_errors.is_empty()
            && (200..300).contains(&resp.status);

        if provider_errors.is_empty() && !(200..300).contains(&resp.status) {
            out.errors.push(if out.message.is_empty() {
                format!("HTTP {}", resp.status)
            } else {
                format!("HTTP {}: {}", resp.status, out.message)
            });
        }
        out.errors.extend(provider_errors);
        out
    }

    pub fn from_error(err: &Error) -> Self {
        NormalizedResult {
            errors: vec![err.to_string()],
            ..Default::default()
        }
    }
}

/// Render the provider's `errors` field (string, array, or object) as strings.
fn provider_errors(value: Option<&Value>) -> Vec<String> {
    fn render(v: &Value) -> Option<String> {
        match v {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    match value {
        Some(Value::Array(items)) => items.iter().filter_map(render).collect(),
        Some(Value::Object(map)) if map.is_empty() => Vec::new(),
        Some(v) => render(v).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Shape the outcome of [`RequestExecutor::send`](super::execution::RequestExecutor::send).
pub fn normalize(outcome: &Result<RawResponse>) -> NormalizedResult {
    match outcome {
        Ok(resp) => NormalizedResult::from_response(resp),
        Err(err) => NormalizedResult::from_error(err),
    }
}
