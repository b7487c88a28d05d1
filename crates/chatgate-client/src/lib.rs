//! # chatgate-client
//!
//! Client SDK for chat-completion upstreams routed by credential prefix.
//!
//! Completion of a chat call is observed through the future returned by
//! [`ChatClient::chat`]; incremental streamed text arrives through the
//! `on_update` callback in [`ChatOptions`]. The usage reporter derives
//! consumption and quota figures from the endpoints that match the
//! configured credential's upstream family.

mod client;
mod error;
mod stream;
mod tracker;
mod types;
mod usage;

pub use client::{ChatClient, CHAT_PATH};
pub use error::ClientError;
pub use stream::{CallPhase, StreamState};
pub use tracker::UsageTracker;
pub use types::{ChatOptions, ClientConfig, UpdateFn};
pub use usage::{UsageReport, CREDIT_GRANTS_PATH, SUBSCRIPTION_PATH, USAGE_PATH};
