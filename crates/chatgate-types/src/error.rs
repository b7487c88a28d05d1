//! Gateway errors.

use thiserror::Error;

/// Errors that can occur while forwarding a request upstream.
///
/// Policy and resolution failures are raised before any outbound call;
/// timeout and transport failures come from the call itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The admission policy rejected the request body.
    #[error("you are not allowed to use {model} model")]
    PolicyRejected { model: String },

    /// The credential classified as Unknown and no base URL override was
    /// present. Fails closed rather than forwarding to an undefined host.
    #[error("no upstream resolved for this credential")]
    NoUpstream,

    /// The upstream did not respond before the forward deadline.
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    /// Network or connection failure talking to the upstream.
    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// HTTP status code relayed to the caller for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::PolicyRejected { .. } => 403,
            Self::NoUpstream => 502,
            Self::Timeout(_) => 504,
            Self::Transport(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            GatewayError::PolicyRejected { model: "gpt-4".to_string() }.http_status_code(),
            403
        );
        assert_eq!(GatewayError::NoUpstream.http_status_code(), 502);
        assert_eq!(GatewayError::Timeout(600).http_status_code(), 504);
    }

    #[test]
    fn test_policy_message_names_model() {
        let err = GatewayError::PolicyRejected { model: "gpt-4".to_string() };
        assert_eq!(err.to_string(), "you are not allowed to use gpt-4 model");
    }
}
