//! Groq API client implementation
//!
//! Adapter for Groq's OpenAI-compatible chat-completions endpoint, with
//! Bearer authentication and the "choices/message/content" extraction
//! path.

mod models;
pub use models::*;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::services::common::{
    build_http_client, read_json_response, send_with_deadline, upstream_error, UserAgent,
};
use crate::services::ProviderAdapter;

/// Groq API client
pub struct GroqClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: ProviderConfig,
}

impl GroqClient {
    /// Create a new Groq client with the given configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = build_http_client(Some(UserAgent {
            extra: Some("groq-client".to_string()),
            ..UserAgent::default()
        }))?;

        Ok(Self { http_client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ProviderAdapter for GroqClient {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn invoke(&self, prompt: &str) -> Result<Value> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_output_tokens),
        };

        debug!(
            "Sending request to Groq: model={} prompt_chars={}",
            self.config.model,
            prompt.chars().count()
        );

        let send = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send();

        let response = send_with_deadline(self.name(), self.config.timeout_ms, send).await?;
        read_json_response(self.name(), response).await
    }

    fn extract(&self, payload: &Value) -> Result<Option<String>> {
        if let Some(err) = upstream_error(self.name(), payload) {
            return Err(err);
        }

        // A mis-shaped 200 payload is an empty result, not a failure.
        let decoded: ChatCompletionResponse =
            serde_json::from_value(payload.clone()).unwrap_or_default();

        Ok(decoded.first_text())
    }
}
