//! Chat-completion protocol message types.

use serde::{Deserialize, Serialize};

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author ("user", "assistant", "system").
    pub role: String,
    /// Text content of the message.
    pub content: String,
}

/// Fully merged model configuration for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g. "gpt-3.5-turbo").
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { model: "gpt-3.5-turbo".to_string(), temperature: 0.5, presence_penalty: 0.0 }
    }
}

impl ModelConfig {
    /// Layer overrides over defaults: per-session first, then call-site,
    /// last-wins per field.
    pub fn layered(
        defaults: &ModelConfig,
        session: Option<&ModelOverrides>,
        call: Option<&ModelOverrides>,
    ) -> ModelConfig {
        let mut merged = defaults.clone();
        for overrides in [session, call].into_iter().flatten() {
            overrides.apply(&mut merged);
        }
        merged
    }
}

/// Partial model configuration; unset fields inherit from the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub presence_penalty: Option<f32>,
}

impl ModelOverrides {
    fn apply(&self, target: &mut ModelConfig) {
        if let Some(model) = &self.model {
            target.model.clone_from(model);
        }
        if let Some(temperature) = self.temperature {
            target.temperature = temperature;
        }
        if let Some(presence_penalty) = self.presence_penalty {
            target.presence_penalty = presence_penalty;
        }
    }
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload {
    /// Conversation messages, in order.
    pub messages: Vec<ChatMessage>,
    /// Enable SSE streaming response.
    pub stream: bool,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
}

impl ChatPayload {
    pub fn new(messages: Vec<ChatMessage>, config: &ModelConfig, stream: bool) -> Self {
        Self {
            messages,
            stream,
            model: config.model.clone(),
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
        }
    }
}

/// Response from the chat completions endpoint (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated completion choices.
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice in the list.
    #[serde(default)]
    pub index: u32,
    /// Complete message (non-streaming responses).
    pub message: Option<ChatMessage>,
    /// Incremental content (streaming responses).
    pub delta: Option<ChatDelta>,
    /// Reason generation stopped ("stop", "length", etc.).
    pub finish_reason: Option<String>,
}

/// Incremental content delta within one streamed event.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatDelta {
    /// Role of the message author (first chunk only).
    pub role: Option<String>,
    /// Incremental text content.
    pub content: Option<String>,
}

/// One SSE event payload in a streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    /// Generated completion choices.
    pub choices: Vec<ChatChoice>,
}
