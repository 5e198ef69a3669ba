//! Common utilities for provider adapters
//!
//! Shared HTTP client construction, deadline handling, and defensive
//! decoding of upstream payloads.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client};
use serde_json::Value;

use crate::error::{ExplainError, Result};

/// Upper bound on upstream body text quoted back in error messages
const ERROR_SNIPPET_CHARS: usize = 200;

/// UserAgent structure for identifying the client to upstream services
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "code-explainer".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("provider-sdk".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build a standard HTTP client with default settings.
///
/// No per-request timeout is set here; the explicit deadline in
/// [`send_with_deadline`] is the cancellation authority.
pub fn build_http_client(user_agent: Option<UserAgent>) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| ExplainError::internal(format!("Invalid user agent: {}", e)))?,
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| ExplainError::internal(format!("Failed to build HTTP client: {}", e)))?;

    Ok(client)
}

/// Await an in-flight upstream call under an explicit deadline.
///
/// When the timer fires the future is dropped, abandoning the call; no
/// work happens on a result that arrives late.
pub async fn send_with_deadline<F>(
    provider: &str,
    timeout_ms: u64,
    send: F,
) -> Result<reqwest::Response>
where
    F: Future<Output = reqwest::Result<reqwest::Response>>,
{
    match tokio::time::timeout(Duration::from_millis(timeout_ms), send).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ExplainError::from_reqwest(provider, timeout_ms, err)),
        Err(_) => {
            log::warn!("{} call exceeded {}ms deadline, cancelling", provider, timeout_ms);
            Err(ExplainError::timeout(provider, timeout_ms))
        }
    }
}

/// Read an upstream response body as raw JSON.
///
/// The status code is deliberately not treated as authoritative: some
/// providers report application failures inside 200-class bodies, so
/// error detection happens against the decoded payload during
/// extraction. A non-success response whose body is not JSON is still
/// an application-level rejection.
pub async fn read_json_response(provider: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|e| ExplainError::transport(provider, format!("Failed to read response: {}", e)))?;

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => Ok(json),
        Err(_) if !status.is_success() => Err(ExplainError::upstream(
            provider,
            format!("HTTP {}: {}", status.as_u16(), snippet(&body)),
        )),
        Err(e) => Err(ExplainError::internal(format!(
            "{} returned malformed JSON: {}",
            provider, e
        ))),
    }
}

/// Probe a decoded payload for a provider-reported error object.
///
/// Both providers use an `error` envelope with a `message` field; a bare
/// string or any other shape is carried through serialized so the
/// upstream text reaches the caller verbatim. An explicit `error: null`
/// is not an error report.
pub fn upstream_error(provider: &str, payload: &Value) -> Option<ExplainError> {
    let error = payload.get("error")?;
    if error.is_null() {
        return None;
    }

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| error.as_str().map(str::to_string))
        .unwrap_or_else(|| error.to_string());

    Some(ExplainError::upstream(provider, message))
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_SNIPPET_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(ERROR_SNIPPET_CHARS).collect();
        format!("{}...", cut)
    }
}
