//! Outbound HTTP plumbing.
//!
//! The retry loop only sees the [`Transport`] trait, so tests (and callers with
//! their own HTTP stack) can swap the reqwest-backed [`HttpTransport`] out.

pub mod http;

pub use http::{HttpTransport, TransportError};

use crate::error::Error;
use reqwest::header::HeaderMap;

/// A completed HTTP exchange, before any classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> crate::Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|e| Error::MalformedResponse {
            status: self.status,
            message: e.to_string(),
        })
    }
}

/// Something that can POST a JSON document and hand back the raw response.
///
/// Implementations perform exactly one network exchange per call and never retry.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> std::result::Result<RawResponse, TransportError>;
}
