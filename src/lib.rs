//! # braze-client
//!
//! Blocking client for the Braze (formerly Appboy) user REST API: attribute
//! tracking, event and purchase recording, and user deletion.
//!
//! ## Overview
//!
//! Payloads are serialized into the provider's REST contract, sent with a
//! bounded retry loop, and every outcome is normalized into a
//! [`NormalizedResult`] with the same four fields, whatever happened on the
//! wire.
//!
//! ## Key Features
//!
//! - **Always a result**: `track` and `delete` never return `Err`; network
//!   failures, rate limits and malformed bodies show up in `errors`
//! - **Retries**: network failures and 5xx responses are retried with
//!   randomized exponential backoff
//! - **Rate limits**: a 429 whose `X-RateLimit-Reset` is close enough is waited
//!   out; one further away fails immediately without sleeping
//! - **Injectable time**: clock, sleeper and transport can be swapped for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use braze_client::{BrazeClient, Records};
//! use serde_json::json;
//!
//! fn main() -> braze_client::Result<()> {
//!     let client = BrazeClient::new("your-api-key")?;
//!
//!     let attributes = Records::try_from(json!([{
//!         "external_id": "1",
//!         "first_name": "First name",
//!         "email": "email@example.com",
//!     }]))?;
//!
//!     let r = client.track(Some(attributes), None, None);
//!     if r.success {
//!         println!("tracked");
//!     } else {
//!         eprintln!("failed: {:?}", r.errors);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, payloads, retry loop and normalization |
//! | [`resilience`] | Backoff, rate-limit signal, clock and sleeper |
//! | [`transport`] | `Transport` trait and the reqwest implementation |

pub mod client;
pub mod resilience;
pub mod transport;

// Re-export main types for convenience
pub use client::{
    normalize, BrazeClient, BrazeClientBuilder, Credential, Endpoint, NormalizedResult, Object,
    Records, RequestExecutor, RetryPolicy, UserDelete, UserTrack,
};
pub use transport::{RawResponse, Transport, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
