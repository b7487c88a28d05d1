//! Bearer credential parsing and upstream classification.

use serde::{Deserialize, Serialize};

/// Prefix marking an internal access code rather than a passthrough API key.
pub const ACCESS_CODE_PREFIX: &str = "ak-";

/// A parsed `Authorization` value. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Parse a raw authorization header value: trim, drop every literal
    /// `"Bearer "` marker, trim again.
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim().replace("Bearer ", "").trim().to_string();
        Self { token }
    }

    /// The trimmed, bearer-stripped token.
    pub fn normalized_token(&self) -> &str {
        &self.token
    }

    /// True when the token is a passthrough API key rather than an internal
    /// access code.
    pub fn is_passthrough_key(&self) -> bool {
        !self.token.starts_with(ACCESS_CODE_PREFIX)
    }

    /// Classify which upstream family this credential belongs to.
    ///
    /// This prefix test is the sole routing signal in the gateway. It is a
    /// deliberately simple heuristic, not a security boundary: a credential
    /// can classify as `Unknown` and still be forwarded verbatim when an
    /// operator override supplies a base URL.
    pub fn classify(&self) -> UpstreamKind {
        if self.token.is_empty() || !self.is_passthrough_key() {
            return UpstreamKind::Unknown;
        }
        if self.token.starts_with("sk-") {
            UpstreamKind::OpenAi
        } else if self.token.starts_with("fk") {
            UpstreamKind::Api2d
        } else {
            UpstreamKind::Unknown
        }
    }
}

/// Which upstream family a credential routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamKind {
    /// No routable prefix recognized.
    Unknown,
    /// `sk-` keys, served by api.openai.com.
    OpenAi,
    /// `fk` keys, served by the api2d relay.
    Api2d,
}
