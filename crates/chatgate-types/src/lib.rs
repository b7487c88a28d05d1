//! # chatgate-types
//!
//! Foundational types for the chatgate gateway and client:
//!
//! - **`credential`** - bearer token parsing and upstream classification
//! - **`error`** - gateway error taxonomy with HTTP status mapping
//! - **`protocol`** - chat-completion request/response message types
//!
//! This crate sits at the bottom of the dependency graph; both the
//! forwarding gateway and the client SDK build on it. All types are
//! serde-friendly and `Clone` for cheap sharing across async boundaries.

pub mod credential;
pub mod error;
pub mod protocol;

pub use credential::{Credential, UpstreamKind, ACCESS_CODE_PREFIX};
pub use error::GatewayError;
pub use protocol::{
    ChatChoice, ChatDelta, ChatMessage, ChatPayload, ChatResponse, ModelConfig, ModelOverrides,
    StreamChunk,
};
