use super::{RawResponse, Transport};
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;
use std::time::Duration;

/// Blocking reqwest transport with a fixed per-attempt timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration, proxy_url: Option<&str>) -> crate::Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    crate::ErrorContext::new()
                        .with_field_path("env.BRAZE_PROXY_URL")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> std::result::Result<RawResponse, TransportError> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body).map_err(|e| TransportError::Other(e.to_string()))?)
            .send()?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text()?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
