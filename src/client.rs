//! Braze user API client.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod credential;
pub mod endpoint;
pub mod execution;
pub mod payload;
mod policy;
pub mod response;
pub mod state;

pub use builder::BrazeClientBuilder;
pub use self::core::{BrazeClient, DEFAULT_API_URL, LEGACY_APPBOY_API_URL};
pub use credential::Credential;
pub use endpoint::Endpoint;
pub use execution::{AttemptOutcome, RequestExecutor, RetryKind};
pub use payload::{Object, Records, UserDelete, UserTrack};
pub use policy::{RetryPolicy, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_WAIT};
pub use response::{normalize, NormalizedResult, ACCEPTED_MESSAGES};
pub use state::RetryState;
