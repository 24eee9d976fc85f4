use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Setting or payload field that caused the error
    /// (e.g., "builder.base_url", "env.BRAZE_MAX_ATTEMPTS")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "payload")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the client.
///
/// The first three variants are the execution failures the retry loop
/// classifies; the rest are local (configuration, payload, body decoding).
#[derive(Debug, Error)]
pub enum Error {
    /// Connection-level failure: refused, timed out, DNS, TLS.
    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// HTTP 429 whose reset lies further out than the client is willing to block.
    #[error("BrazeRateLimitError: provider rate limit resets in {seconds_to_reset:.3}s")]
    RateLimited {
        seconds_to_reset: f64,
        max_wait_secs: f64,
    },

    /// HTTP 5xx from the provider.
    #[error("BrazeInternalServerError: HTTP {status}")]
    Server { status: u16, body: String },

    /// Body of an otherwise completed exchange was not JSON.
    #[error("Malformed response (HTTP {status}): {message}")]
    MalformedResponse { status: u16, message: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
