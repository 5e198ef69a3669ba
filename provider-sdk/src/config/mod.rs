//! Configuration management for the explain pipeline
//!
//! All configuration is read from environment variables once at startup
//! and collected into a single `ProviderConfig` passed into the pipeline
//! at construction time. Presence of the provider credential is validated
//! in exactly one place (the pipeline precheck), not scattered across
//! call sites.
//!
//! Configuration (.env file):
//! - LLM_PROVIDER: which provider serves requests ("gemini" or "groq")
//! - GEMINI_API_KEY / GROQ_API_KEY: credential for the selected provider
//! - LLM_MODEL: model identifier (defaults per provider)
//! - LLM_ENDPOINT: upstream base URL (defaults per provider)
//! - LLM_TIMEOUT_MS: upstream cancellation window (default: 8000)
//! - LLM_MAX_OUTPUT_TOKENS: upstream generation cap (default: 1024)
//! - LLM_TEMPERATURE: sampling temperature (default: 0.4)
//! - LLM_MAX_PROMPT_CHARS: optional explicit prompt truncation (unset = off)

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{ExplainError, Result};

/// Default upstream cancellation window, chosen to stay safely under
/// typical serverless execution limits.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Default cap on upstream generation length
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1_024;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// The closed set of supported upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Google Gemini ("candidates/content/parts" payload shape)
    Gemini,
    /// Groq (OpenAI-compatible "choices/message/content" payload shape)
    Groq,
}

impl Provider {
    /// Display name used in error messages and logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Groq => "Groq",
        }
    }

    /// Environment variable holding this provider's credential
    pub fn credential_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }

    /// Default upstream base URL
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::Groq => "https://api.groq.com/openai/v1",
        }
    }

    /// Default model identifier
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-flash",
            Provider::Groq => "llama-3.1-8b-instant",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = ExplainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "groq" => Ok(Provider::Groq),
            other => Err(ExplainError::internal(format!(
                "Unknown LLM_PROVIDER '{}' (expected 'gemini' or 'groq')",
                other
            ))),
        }
    }
}

/// Everything the invoker needs for one provider: endpoint, credential,
/// model identifier, sampling parameters, and the timeout window.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    /// Explicit prompt truncation, off unless configured
    pub max_prompt_chars: Option<usize>,
}

impl ProviderConfig {
    /// Build a config with per-provider defaults and an empty credential
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            api_key: String::new(),
            model: provider.default_model().to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_prompt_chars: None,
        }
    }

    /// Load the full configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let provider = match env::var("LLM_PROVIDER") {
            Ok(value) => value.parse::<Provider>()?,
            Err(_) => Provider::Gemini,
        };

        let mut config = Self::for_provider(provider);
        config.api_key = env::var(provider.credential_env()).unwrap_or_default();

        if let Ok(endpoint) = env::var("LLM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(model) = env::var("LLM_MODEL") {
            config.model = model;
        }
        config.timeout_ms = get_env_var("LLM_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        config.max_output_tokens = get_env_var("LLM_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS);
        config.temperature = get_env_var("LLM_TEMPERATURE", DEFAULT_TEMPERATURE);
        config.max_prompt_chars = env::var("LLM_MAX_PROMPT_CHARS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());

        Ok(config)
    }

    /// Whether a usable credential is configured
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Helper function to read environment variables with default values
fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
