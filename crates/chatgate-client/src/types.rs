//! Client configuration and per-call options.

use chatgate_types::{ChatMessage, ModelConfig, ModelOverrides};
use tokio::sync::oneshot;

/// Incremental-update callback: (full text so far, just-appended delta).
pub type UpdateFn = Box<dyn FnMut(&str, &str) + Send>;

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream (or of a gateway in front of it).
    pub base_url: String,
    /// Bearer credential; also drives the usage reporter's endpoint choice.
    pub api_key: String,
    /// How long to wait for the upstream to open the stream, in seconds.
    pub send_timeout_secs: u64,
    /// Global model configuration defaults, lowest layer of the merge.
    pub model_defaults: ModelConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            send_timeout_secs: 60,
            model_defaults: ModelConfig::default(),
        }
    }
}

/// Options for one chat call.
///
/// Completion is observed through the future returned by
/// [`crate::ChatClient::chat`]; `on_update` fires once per streamed delta.
pub struct ChatOptions {
    /// Conversation messages, in order.
    pub messages: Vec<ChatMessage>,
    /// Per-session model overrides, layered over the client defaults.
    pub session: Option<ModelOverrides>,
    /// Call-site model overrides, highest-precedence layer.
    pub call: Option<ModelOverrides>,
    /// Request a streamed response.
    pub stream: bool,
    /// Incremental-update callback for streamed deltas.
    pub on_update: Option<UpdateFn>,
    /// External cancellation: firing the paired sender finishes the call
    /// with whatever text has accumulated.
    pub cancel: Option<oneshot::Receiver<()>>,
}

impl ChatOptions {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages, session: None, call: None, stream: false, on_update: None, cancel: None }
    }
}
