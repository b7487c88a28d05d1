//! Request admission policy.

use chatgate_types::GatewayError;

/// Rejects requests that declare a restricted model.
///
/// Fail-open by design: a body that is not JSON is not a policy violation
/// (the upstream performs its own validation), so it is admitted untouched.
#[derive(Debug, Clone)]
pub struct ModelPolicy {
    restricted: Option<String>,
}

impl ModelPolicy {
    pub fn new(restricted: Option<String>) -> Self {
        Self { restricted }
    }

    /// Check a request body against the policy. This is the only place a
    /// request can be rejected before touching the network.
    pub fn admit(&self, body: &[u8]) -> Result<(), GatewayError> {
        let Some(restricted) = self.restricted.as_deref() else {
            return Ok(());
        };

        let parsed: serde_json::Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("model filter: request body is not JSON: {e}");
                return Ok(());
            }
        };

        let model = parsed.get("model").and_then(|m| m.as_str()).unwrap_or("");
        if model.contains(restricted) {
            return Err(GatewayError::PolicyRejected { model: restricted.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restricted_model_rejected() {
        let policy = ModelPolicy::new(Some("gpt-4".to_string()));
        let err = policy.admit(br#"{"model":"gpt-4-turbo"}"#).unwrap_err();
        assert_eq!(err, GatewayError::PolicyRejected { model: "gpt-4".to_string() });
    }

    #[test]
    fn test_other_model_admitted() {
        let policy = ModelPolicy::new(Some("gpt-4".to_string()));
        assert!(policy.admit(br#"{"model":"gpt-3.5-turbo"}"#).is_ok());
    }

    #[test]
    fn test_malformed_body_fails_open() {
        let policy = ModelPolicy::new(Some("gpt-4".to_string()));
        assert!(policy.admit(b"not json at all").is_ok());
    }

    #[test]
    fn test_inactive_policy_admits_everything() {
        let policy = ModelPolicy::new(None);
        assert!(policy.admit(br#"{"model":"gpt-4"}"#).is_ok());
    }

    #[test]
    fn test_missing_model_field_admitted() {
        let policy = ModelPolicy::new(Some("gpt-4".to_string()));
        assert!(policy.admit(br#"{"messages":[]}"#).is_ok());
    }
}
