//! Gemini API data models
//!
//! Request envelope and response types for the `generateContent` call.
//! Response fields are all optional: the payload is untrusted external
//! data and extraction must stay total over any shape variation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// generateContent request envelope
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// Content block in a request
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Text part within a content block
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,

    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// generateContent response payload
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

/// A response candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content within a response candidate
#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<CandidatePart>>,
}

/// Text part within a response candidate.
///
/// `text` stays a raw `Value` so a mistyped field degrades to "no text"
/// instead of failing the whole decode.
#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<Value>,
}

impl GenerateContentResponse {
    /// Extraction path: first candidate -> content -> first part -> text
    pub fn first_text(&self) -> Option<String> {
        let part = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?;

        let text = part.text.as_ref()?.as_str()?;
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}
