//! Upstream target resolution.

use chatgate_types::{GatewayError, UpstreamKind};

use crate::config::GatewayConfig;

const OPENAI_HOST: &str = "api.openai.com";
const API2D_HOST: &str = "oa.api2d.net";
const DEFAULT_PROTOCOL: &str = "https";

/// A concrete upstream endpoint chosen for one forwarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Scheme-qualified base URL without a trailing slash.
    pub base_url: String,
}

/// Resolve a classification (plus operator overrides) to a concrete target.
///
/// An explicit base URL override wins regardless of classification. Without
/// one, `Unknown` fails closed: forwarding to an undefined host is never
/// attempted.
pub fn resolve(kind: UpstreamKind, config: &GatewayConfig) -> Result<UpstreamTarget, GatewayError> {
    let host = match config.base_url.as_deref() {
        Some(url) => url.to_string(),
        None => match kind {
            UpstreamKind::OpenAi => OPENAI_HOST.to_string(),
            UpstreamKind::Api2d => API2D_HOST.to_string(),
            UpstreamKind::Unknown => return Err(GatewayError::NoUpstream),
        },
    };

    let protocol = config.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL);
    let base_url = if host.starts_with("http") {
        host
    } else {
        format!("{protocol}://{host}")
    };
    let base_url = base_url.trim_end_matches('/').to_string();

    tracing::info!(%base_url, ?kind, "resolved upstream target");
    Ok(UpstreamTarget { base_url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_selects_host() {
        let config = GatewayConfig::default();
        let target = resolve(UpstreamKind::OpenAi, &config).unwrap();
        assert_eq!(target.base_url, "https://api.openai.com");

        let target = resolve(UpstreamKind::Api2d, &config).unwrap();
        assert_eq!(target.base_url, "https://oa.api2d.net");
    }

    #[test]
    fn test_override_wins_over_classification() {
        let config =
            GatewayConfig { base_url: Some("relay.internal".to_string()), ..Default::default() };
        for kind in [UpstreamKind::OpenAi, UpstreamKind::Api2d, UpstreamKind::Unknown] {
            let target = resolve(kind, &config).unwrap();
            assert_eq!(target.base_url, "https://relay.internal");
        }
    }

    #[test]
    fn test_override_with_scheme_used_verbatim() {
        let config = GatewayConfig {
            base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..Default::default()
        };
        let target = resolve(UpstreamKind::Unknown, &config).unwrap();
        assert_eq!(target.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_protocol_override() {
        let config = GatewayConfig { protocol: Some("http".to_string()), ..Default::default() };
        let target = resolve(UpstreamKind::OpenAi, &config).unwrap();
        assert_eq!(target.base_url, "http://api.openai.com");
    }

    #[test]
    fn test_unknown_fails_closed() {
        let config = GatewayConfig::default();
        assert_eq!(resolve(UpstreamKind::Unknown, &config), Err(GatewayError::NoUpstream));
    }
}
