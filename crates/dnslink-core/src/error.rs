//! Error types for dnslink publishing
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for dnslink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dnslink publishing
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or empty input)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No account reachable by the token owns the zone
    #[error("did not find account for: {0}")]
    ZoneNotFound(String),

    /// A provider write failed; labelled with the operation that failed
    #[error("{operation}: {source}")]
    Operation {
        /// Operation label, e.g. "CreateRecord"
        operation: &'static str,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "zone not found" error naming the domain
    pub fn zone_not_found(domain: impl Into<String>) -> Self {
        Self::ZoneNotFound(domain.into())
    }

    /// Wrap an error with the label of the operation that produced it
    pub fn operation(operation: &'static str, source: Error) -> Self {
        Self::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Label of the failed write, if this error came from one
    pub fn operation_label(&self) -> Option<&'static str> {
        match self {
            Self::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Remove every occurrence of `secret` from `text`
///
/// Provider errors can echo request parameters back, the token included.
/// An empty secret leaves the text untouched.
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "")
}
