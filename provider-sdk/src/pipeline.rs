//! The explain pipeline
//!
//! Strictly linear control flow with no shared mutable state between
//! requests: Validator -> Builder -> Invoker -> Normalizer. Every stage
//! fails fast; there is no partial recovery and no fallback provider
//! chain.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::config::{Provider, ProviderConfig};
use crate::error::{ExplainError, Result};
use crate::prompt::build_prompt;
use crate::services::{gemini::GeminiClient, groq::GroqClient, ProviderAdapter};

/// Returned as a successful explanation when upstream produced no usable
/// text. An empty model response is a legitimate outcome, not a failure.
pub const FALLBACK_EXPLANATION: &str = "No explanation generated.";

/// A validated explain request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub code: String,
}

impl ExplainRequest {
    /// Validate a raw parsed body into an `ExplainRequest`.
    ///
    /// Pure function of its input: fails with `InvalidInput` when the
    /// body is absent or not an object, when `code` is missing or not a
    /// string, or when `code` is empty after trimming.
    pub fn from_body(body: &Value) -> Result<Self> {
        let code = body
            .get("code")
            .ok_or_else(|| ExplainError::invalid_input("missing `code` field"))?;

        let code = code
            .as_str()
            .ok_or_else(|| ExplainError::invalid_input("`code` must be a string"))?;

        if code.trim().is_empty() {
            return Err(ExplainError::invalid_input("`code` is empty"));
        }

        Ok(Self {
            code: code.to_string(),
        })
    }
}

/// The request-forwarding pipeline, one instance shared across requests.
///
/// Holds only read-only state (configuration and the provider adapter);
/// concurrent requests need no coordination. Each invocation owns its own
/// provider request and its own timer.
pub struct ExplainPipeline {
    adapter: Arc<dyn ProviderAdapter>,
    config: ProviderConfig,
}

impl ExplainPipeline {
    /// Build a pipeline for the provider selected in the configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let adapter: Arc<dyn ProviderAdapter> = match config.provider {
            Provider::Gemini => Arc::new(GeminiClient::new(config.clone())?),
            Provider::Groq => Arc::new(GroqClient::new(config.clone())?),
        };

        Ok(Self { adapter, config })
    }

    /// The provider this pipeline forwards to
    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    /// Whether a usable credential is configured
    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    /// Run one request through the full pipeline.
    ///
    /// The credential precheck is the first observable action, before any
    /// body inspection, so a misconfigured deployment never burns the
    /// timeout budget on a call that cannot succeed.
    pub async fn explain(&self, body: &Value) -> Result<String> {
        if !self.config.has_credential() {
            return Err(ExplainError::missing_credential(
                self.config.provider.credential_env(),
            ));
        }

        let request = ExplainRequest::from_body(body)?;

        let mut prompt = build_prompt(&request.code);
        if let Some(limit) = self.config.max_prompt_chars {
            prompt = truncate_chars(prompt, limit);
        }

        debug!(
            "Dispatching explain request to {}: prompt_chars={}",
            self.adapter.name(),
            prompt.chars().count()
        );

        let payload = self.adapter.invoke(&prompt).await?;

        match self.adapter.extract(&payload)? {
            Some(text) => Ok(text),
            None => {
                warn!(
                    "{} returned no usable explanation text, serving fallback",
                    self.adapter.name()
                );
                Ok(FALLBACK_EXPLANATION.to_string())
            }
        }
    }
}

/// Cut a prompt to at most `limit` characters, on a char boundary.
fn truncate_chars(prompt: String, limit: usize) -> String {
    if prompt.chars().count() <= limit {
        prompt
    } else {
        prompt.chars().take(limit).collect()
    }
}
