//! Typed error enum for provider calls.

use thiserror::Error;

use crate::config::ProviderKind;

/// Errors from provider API operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} provider not configured")]
    NotConfigured(ProviderKind),
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("provider rejected credentials (HTTP {code}): {body}")]
    Unauthorized { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid relay path: {0}")]
    InvalidPath(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<ProviderError>),
}

impl ProviderError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }

    /// Whether the provider as a whole is unusable (missing or rejected
    /// credentials). Callers stop querying it for the rest of the request.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotConfigured(_) | Self::Unauthorized { .. })
    }

    /// HTTP status the relay reports for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotConfigured(_) => 503,
            Self::HttpStatus { code, .. } | Self::Unauthorized { code, .. } => *code,
            Self::HttpRequest(e) if e.is_timeout() => 504,
            Self::HttpRequest(_) | Self::JsonParse { .. } => 502,
            Self::InvalidPath(_) => 400,
            Self::ClientInit(_) => 500,
            Self::RetriesExhausted(last) => last.status_code(),
        }
    }

    /// Short machine-readable error label for relay responses.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "provider_not_configured",
            Self::HttpRequest(_) => "network_error",
            Self::HttpStatus { .. } => "provider_error",
            Self::Unauthorized { .. } => "provider_unauthorized",
            Self::JsonParse { .. } => "malformed_response",
            Self::InvalidPath(_) => "invalid_path",
            Self::ClientInit(_) => "client_init",
            Self::RetriesExhausted(last) => last.label(),
        }
    }

    /// Relay failure body: `{ error, status, details }`.
    #[must_use]
    pub fn relay_body(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.label(),
            "status": self.status_code(),
            "details": self.to_string(),
        })
    }
}
