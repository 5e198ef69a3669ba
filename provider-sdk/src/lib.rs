//! # Provider SDK
//!
//! Upstream LLM provider integrations for the code explainer gateway.
//!
//! This crate provides:
//!
//! - The request-forwarding pipeline: validation, prompt construction,
//!   bounded-time upstream invocation, and response normalization
//! - Provider-specific typed adapters behind a single capability trait
//! - A layered error taxonomy covering every failure mode
//! - Configuration management from environment variables
//!
//! ## Architecture
//!
//! The SDK is designed around the following key abstractions:
//!
//! - `ExplainPipeline`: the linear Validator -> Builder -> Invoker ->
//!   Normalizer flow, one instance shared across requests
//! - `ProviderAdapter`: the invoke/extract capability pair each upstream
//!   provider implements; the pipeline never sees a concrete payload shape
//! - `ExplainError`: normalized error taxonomy for every stage
//! - `ProviderConfig`: one configuration value, validated at one point

// Re-export error handling
pub mod error;
pub use error::{ExplainError, Result};

// Re-export configuration management
pub mod config;
pub use config::{Provider, ProviderConfig};

// Prompt template rendering
pub mod prompt;
pub use prompt::build_prompt;

// Re-export provider adapters
pub mod services;
pub use services::{gemini, groq, ProviderAdapter};

// The pipeline itself
pub mod pipeline;
pub use pipeline::{ExplainPipeline, ExplainRequest, FALLBACK_EXPLANATION};

#[cfg(test)]
mod tests;

/// Create a pipeline configured entirely from environment variables.
pub fn pipeline_from_env() -> Result<ExplainPipeline> {
    ExplainPipeline::new(ProviderConfig::from_env()?)
}
