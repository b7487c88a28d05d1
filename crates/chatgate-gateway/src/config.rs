//! Gateway configuration.
//!
//! Loaded once at startup and threaded through every forwarding call; the
//! gateway itself holds no process-wide mutable state.

/// Default forward deadline: 10 minutes, long enough for slow streamed
/// completions.
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 600;

/// Operator-level overrides and policy flags for the forwarding gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Explicit upstream base URL; wins over credential classification.
    pub base_url: Option<String>,
    /// Transport protocol when the base URL carries none ("https" default).
    pub protocol: Option<String>,
    /// Organization id injected as `OpenAI-Organization` when set.
    pub org_id: Option<String>,
    /// Substring of model names to reject; `None` disables the filter.
    pub restricted_model: Option<String>,
    /// Deadline for one forwarded request, in seconds.
    pub forward_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            protocol: None,
            org_id: None,
            restricted_model: None,
            forward_timeout_secs: DEFAULT_FORWARD_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Read overrides from the environment: `BASE_URL`, `PROTOCOL`,
    /// `OPENAI_ORG_ID`, and the `DISABLE_GPT4` flag.
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var("BASE_URL"),
            protocol: non_empty_var("PROTOCOL"),
            org_id: non_empty_var("OPENAI_ORG_ID"),
            restricted_model: non_empty_var("DISABLE_GPT4").map(|_| "gpt-4".to_string()),
            forward_timeout_secs: DEFAULT_FORWARD_TIMEOUT_SECS,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw.trim().to_string();
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
        Err(_) => None,
    }
}
