//! Chat client: non-streaming calls and the streaming event loop.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use chatgate_types::{ChatPayload, ChatResponse, ModelConfig, StreamChunk};

use crate::error::ClientError;
use crate::stream::{CallPhase, StreamState};
use crate::types::{ChatOptions, ClientConfig, UpdateFn};

/// Relative path of the chat completions endpoint.
pub const CHAT_PATH: &str = "v1/chat/completions";

const DONE_SENTINEL: &str = "[DONE]";

pub struct ChatClient {
    http: Client,
    config: ClientConfig,
}

impl ChatClient {
    /// Create a client. No global request timeout is set on the inner
    /// `reqwest::Client`: streamed completions can legitimately outlive any
    /// fixed deadline, so only the stream-open wait is bounded.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.config.send_timeout_secs)
    }

    /// Issue a chat call.
    ///
    /// The returned future is the completion channel: `Ok` carries the
    /// final text (model output, or diagnostic text when the upstream
    /// answered with an error body), `Err` a transport-level failure.
    /// Streamed deltas are reported through `options.on_update` in the
    /// order their bytes arrive.
    pub async fn chat(&self, options: ChatOptions) -> Result<String, ClientError> {
        let model_config = ModelConfig::layered(
            &self.config.model_defaults,
            options.session.as_ref(),
            options.call.as_ref(),
        );
        let payload = ChatPayload::new(options.messages, &model_config, options.stream);
        tracing::debug!(model = %payload.model, stream = payload.stream, "sending chat request");

        if options.stream {
            self.chat_streaming(payload, options.on_update, options.cancel).await
        } else {
            self.chat_once(payload).await
        }
    }

    async fn chat_once(&self, payload: ChatPayload) -> Result<String, ClientError> {
        let send = self
            .http
            .post(self.url(CHAT_PATH))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send();

        let response = tokio::time::timeout(self.send_timeout(), send)
            .await
            .map_err(|_| ClientError::SendTimeout)??;

        let body: ChatResponse =
            response.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(extract_message(&body))
    }

    async fn chat_streaming(
        &self,
        payload: ChatPayload,
        mut on_update: Option<UpdateFn>,
        cancel: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<String, ClientError> {
        let mut state = StreamState::new();
        tracing::debug!(phase = ?CallPhase::Sending, "opening chat stream");

        // A dropped sender means the caller discarded the handle without
        // cancelling; only an explicit fire aborts the call.
        let mut cancel_fut: Pin<Box<dyn Future<Output = ()> + Send>> = match cancel {
            Some(rx) => Box::pin(async move {
                if rx.await.is_err() {
                    futures::future::pending::<()>().await;
                }
            }),
            None => Box::pin(futures::future::pending()),
        };

        let send = self
            .http
            .post(self.url(CHAT_PATH))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send();

        // The send timeout only guards the unopened stream; once the
        // upstream answers, only close and cancellation end the call.
        let response = tokio::select! {
            _ = &mut cancel_fut => {
                tracing::debug!(phase = ?CallPhase::Aborted, "chat call cancelled before the stream opened");
                return Ok(state.finish().unwrap_or_default());
            }
            sent = tokio::time::timeout(self.send_timeout(), send) => match sent {
                Err(_) => return Err(ClientError::SendTimeout),
                Ok(Err(e)) => return Err(ClientError::Request(e)),
                Ok(Ok(response)) => response,
            },
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        tracing::debug!(%status, %content_type, "stream response opened");

        // Plain-text body: the whole body is the final text.
        if content_type.starts_with("text/plain") {
            let text = response.text().await.unwrap_or_default();
            state.set_text(text);
            return Ok(state.finish().unwrap_or_default());
        }

        // Anything that is not a healthy event stream finishes with
        // diagnostic text instead of model output.
        if status != StatusCode::OK || !content_type.starts_with("text/event-stream") {
            let diagnostic = open_failure_diagnostic(status, response).await;
            state.set_text(diagnostic);
            return Ok(state.finish().unwrap_or_default());
        }

        tracing::debug!(phase = ?CallPhase::Streaming, "event stream open");
        let mut events = response.bytes_stream().eventsource();

        loop {
            tokio::select! {
                _ = &mut cancel_fut => {
                    tracing::debug!(phase = ?CallPhase::Aborted, "chat call cancelled mid-stream");
                    return Ok(state.finish().unwrap_or_default());
                }
                next = events.next() => match next {
                    // Upstream closed without a sentinel: finish with what we have.
                    None => {
                        tracing::debug!(phase = ?CallPhase::Finished, "stream closed by upstream");
                        return Ok(state.finish().unwrap_or_default());
                    }
                    Some(Err(e)) => return Err(ClientError::Stream(e.to_string())),
                    Some(Ok(event)) => {
                        if event.data == DONE_SENTINEL {
                            tracing::debug!(phase = ?CallPhase::Finished, "stream finished");
                            return Ok(state.finish().unwrap_or_default());
                        }
                        match serde_json::from_str::<StreamChunk>(&event.data) {
                            Ok(chunk) => {
                                let delta = chunk
                                    .choices
                                    .first()
                                    .and_then(|c| c.delta.as_ref())
                                    .and_then(|d| d.content.as_deref())
                                    .unwrap_or("");
                                if !delta.is_empty() && state.append(delta) {
                                    if let Some(update) = on_update.as_mut() {
                                        update(state.text(), delta);
                                    }
                                }
                            }
                            // Malformed events are logged and skipped, never fatal.
                            Err(e) => {
                                tracing::error!(payload = %event.data, "failed to parse stream event: {e}");
                            }
                        }
                    }
                }
            }
        }
    }
}

fn extract_message(response: &ChatResponse) -> String {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.as_ref())
        .map(|message| message.content.clone())
        .unwrap_or_default()
}

/// Assemble the finish text for a stream that opened unhealthily: the body
/// (pretty-printed when it is JSON), preceded by a distinguished notice on
/// authentication failures.
async fn open_failure_diagnostic(status: StatusCode, response: reqwest::Response) -> String {
    let mut parts = Vec::new();
    if status == StatusCode::UNAUTHORIZED {
        parts.push(ClientError::Unauthorized.to_string());
    }

    let body = response.text().await.unwrap_or_default();
    let extra = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(body),
        Err(_) => body,
    };
    if !extra.is_empty() {
        parts.push(extra);
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_types::{ChatChoice, ChatMessage};

    #[test]
    fn test_extract_message_takes_first_choice() {
        let response = ChatResponse {
            choices: vec![ChatChoice {
                index: 0,
                message: Some(ChatMessage {
                    role: "assistant".to_string(),
                    content: "Hi there".to_string(),
                }),
                delta: None,
                finish_reason: Some("stop".to_string()),
            }],
        };
        assert_eq!(extract_message(&response), "Hi there");
    }

    #[test]
    fn test_extract_message_empty_choices() {
        let response = ChatResponse { choices: vec![] };
        assert_eq!(extract_message(&response), "");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ChatClient::new(ClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url(CHAT_PATH), "http://localhost:9000/v1/chat/completions");
    }
}
