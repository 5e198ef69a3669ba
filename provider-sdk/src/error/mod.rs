//! Error handling for the provider SDK
//!
//! This module provides the normalized error taxonomy for the explain
//! pipeline:
//! - Categorizes failures by stage (input, configuration, upstream)
//! - Keeps upstream application error text verbatim for diagnostics
//! - Never carries credential material in any message
//! - Provides a convenient Result type alias

use thiserror::Error;

/// Result type for provider SDK operations
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Main error type for the explain pipeline
#[derive(Error, Debug)]
pub enum ExplainError {
    /// Caller sent a malformed or empty request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The credential required by the selected provider is not configured.
    /// Carries the environment variable name, never the value.
    #[error("Missing {0}")]
    MissingCredential(String),

    /// Upstream did not respond within the configured window
    #[error("{provider} request timed out after {timeout_ms}ms")]
    UpstreamTimeout { provider: String, timeout_ms: u64 },

    /// Network-level failure reaching upstream (DNS, connect, TLS)
    #[error("{provider} request failed: {message}")]
    UpstreamTransport { provider: String, message: String },

    /// Upstream reachable but rejected the request at the application level
    #[error("{provider} API Error: {message}")]
    UpstreamApplication { provider: String, message: String },

    /// Unexpected or internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExplainError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ExplainError::InvalidInput(message.into())
    }

    /// Create a missing credential error from the credential's env var name
    pub fn missing_credential(env_var: impl Into<String>) -> Self {
        ExplainError::MissingCredential(env_var.into())
    }

    /// Create an upstream timeout error
    pub fn timeout(provider: impl Into<String>, timeout_ms: u64) -> Self {
        ExplainError::UpstreamTimeout {
            provider: provider.into(),
            timeout_ms,
        }
    }

    /// Create an upstream transport error
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ExplainError::UpstreamTransport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an upstream application error
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ExplainError::UpstreamApplication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        ExplainError::Internal(message.into())
    }

    /// Classify a reqwest failure for a given provider.
    ///
    /// A client-side timeout maps to `UpstreamTimeout` so callers see one
    /// timeout kind regardless of which layer noticed the deadline first.
    pub fn from_reqwest(provider: &str, timeout_ms: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExplainError::timeout(provider, timeout_ms)
        } else if err.is_connect() {
            ExplainError::transport(provider, format!("Connection error: {}", err))
        } else if err.is_request() {
            ExplainError::transport(provider, format!("Invalid request: {}", err))
        } else {
            ExplainError::transport(provider, err.to_string())
        }
    }

    /// Check if this is a retryable error (a caller concern; the pipeline
    /// itself never retries)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExplainError::UpstreamTimeout { .. } | ExplainError::UpstreamTransport { .. }
        )
    }

    /// Name of the provider involved, if the failure came from upstream
    pub fn provider(&self) -> Option<&str> {
        match self {
            ExplainError::UpstreamTimeout { provider, .. }
            | ExplainError::UpstreamTransport { provider, .. }
            | ExplainError::UpstreamApplication { provider, .. } => Some(provider),
            _ => None,
        }
    }
}
