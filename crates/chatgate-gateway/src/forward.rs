//! Request forwarding.

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use std::time::Duration;

use chatgate_types::{Credential, GatewayError};

use crate::config::GatewayConfig;
use crate::policy::ModelPolicy;
use crate::resolver;

/// One inbound request to relay upstream. The internal route prefix has
/// already been stripped from `path_and_query`.
#[derive(Debug)]
pub struct ForwardRequest {
    pub method: Method,
    /// Upstream-relative path with query string, no leading slash.
    pub path_and_query: String,
    /// Raw `Authorization` header value, forwarded verbatim.
    pub authorization: String,
    /// Buffered request body; buffering lets the policy filter inspect the
    /// same bytes that go upstream.
    pub body: Bytes,
}

/// Forward a request to the upstream selected by its credential.
///
/// Classify -> resolve -> admit -> outbound call with a single deadline.
/// The response is relayed with its status and body untouched, minus the
/// header sanitization below.
pub async fn forward(
    http: &reqwest::Client,
    config: &GatewayConfig,
    request: ForwardRequest,
) -> Result<Response, GatewayError> {
    let credential = Credential::parse(&request.authorization);
    let target = resolver::resolve(credential.classify(), config)?;

    ModelPolicy::new(config.restricted_model.clone()).admit(&request.body)?;

    let url = format!("{}/{}", target.base_url, request.path_and_query);
    tracing::info!(path = %request.path_and_query, "forwarding request");

    let mut outbound = http
        .request(request.method, &url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, &request.authorization)
        .body(request.body);
    if let Some(org_id) = &config.org_id {
        outbound = outbound.header("OpenAI-Organization", org_id);
    }

    let deadline = Duration::from_secs(config.forward_timeout_secs);
    let upstream = match tokio::time::timeout(deadline, outbound.send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return Err(GatewayError::Transport(e.to_string())),
        Err(_) => return Err(GatewayError::Timeout(config.forward_timeout_secs)),
    };

    let mut builder = Response::builder().status(upstream.status());
    for (name, value) in upstream.headers() {
        // prevent browser credential prompts
        if name == header::WWW_AUTHENTICATE {
            continue;
        }
        builder = builder.header(name, value);
    }
    // keep reverse proxies from batching streamed bytes
    builder = builder.header("x-accel-buffering", HeaderValue::from_static("no"));

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| GatewayError::Transport(e.to_string()))
}

/// Render a gateway error the way the upstream renders its own errors:
/// status code plus `{"error": true, "message": ...}`.
pub fn error_response(err: &GatewayError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(serde_json::json!({ "error": true, "message": err.to_string() }));
    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = error_response(&GatewayError::PolicyRejected { model: "gpt-4".to_string() });
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let response = error_response(&GatewayError::Timeout(600));
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
