//! Error types for the chat client.

use thiserror::Error;

/// Errors that can occur when using the chat client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream did not open the stream within the send timeout.
    #[error("request timed out before the stream opened")]
    SendTimeout,

    /// Upstream returned 401.
    #[error("unauthorized: please check your API key")]
    Unauthorized,

    /// Usage endpoints returned a non-success status.
    #[error("could not retrieve usage for this API key")]
    UsageUnavailable,

    /// The upstream embedded an error object in an otherwise OK payload.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// SSE transport failed mid-stream.
    #[error("stream error: {0}")]
    Stream(String),

    /// Usage reporting is only defined for sk- and fk credentials.
    #[error("usage reporting is not supported for this credential")]
    UnsupportedCredential,
}
