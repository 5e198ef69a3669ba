//! Groq API data models
//!
//! Groq speaks the OpenAI chat-completions dialect. Response fields are
//! all optional so extraction stays total over shape variations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat message in a conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// The role of the message author
    pub role: String,

    /// The content of the message
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// ID of the model to use
    pub model: String,

    /// The messages to generate a completion for
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completion response payload
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatCompletionChoice>>,
}

/// A chat completion choice
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: Option<ChatCompletionMessage>,
}

/// A message in a chat completion response.
///
/// `content` stays a raw `Value` so a mistyped field degrades to "no
/// text" instead of failing the whole decode.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

impl ChatCompletionResponse {
    /// Extraction path: first choice -> message -> content
    pub fn first_text(&self) -> Option<String> {
        let message = self.choices.as_ref()?.first()?.message.as_ref()?;

        let text = message.content.as_ref()?.as_str()?;
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}
