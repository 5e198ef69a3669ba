//! Gemini API client implementation
//!
//! Strongly-typed adapter for the Gemini `generateContent` endpoint.
//! The credential travels as the `key` query parameter, which is why the
//! request URL is never logged.

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

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: ProviderConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = build_http_client(Some(UserAgent {
            extra: Some("gemini-client".to_string()),
            ..UserAgent::default()
        }))?;

        Ok(Self { http_client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ProviderAdapter for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn invoke(&self, prompt: &str) -> Result<Value> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!(
            "Sending request to Gemini: model={} prompt_chars={}",
            self.config.model,
            prompt.chars().count()
        );

        let send = self
            .http_client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
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
        let decoded: GenerateContentResponse =
            serde_json::from_value(payload.clone()).unwrap_or_default();

        Ok(decoded.first_text())
    }
}
