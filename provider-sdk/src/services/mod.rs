//! Provider-specific adapter implementations
//!
//! Each upstream provider implements the same invoke/extract capability
//! pair; the pipeline depends only on this trait and never on a concrete
//! provider's payload layout. Adding a provider means adding one adapter
//! module here, not touching the pipeline.

pub mod gemini;
pub mod groq;
pub(crate) mod common;

pub use common::UserAgent;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// The capability pair every upstream provider adapter implements
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Display name used in error messages and logs (e.g. "Gemini")
    fn name(&self) -> &str;

    /// Perform exactly one bounded-time HTTPS call with the rendered
    /// prompt and return the raw JSON payload the provider sent back.
    ///
    /// Never retries. The configured timeout cancels the in-flight call;
    /// a late result is discarded.
    async fn invoke(&self, prompt: &str) -> Result<Value>;

    /// Extract the explanation text from a raw payload.
    ///
    /// Returns `Ok(None)` when the payload is structurally valid but the
    /// expected text is absent, empty, or of an unexpected type; fails
    /// with `UpstreamApplication` when the payload carries the provider's
    /// own error object. Total: never panics on missing keys.
    fn extract(&self, payload: &Value) -> Result<Option<String>>;
}
