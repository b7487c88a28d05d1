//! # chatgate-gateway
//!
//! Server-side forwarding core: classify the caller's credential, resolve
//! an upstream base URL, run the admission policy, and relay the request
//! with a bounded wait. The response body is treated as an opaque byte
//! stream; the gateway never parses it.

pub mod config;
pub mod forward;
pub mod policy;
pub mod resolver;

pub use config::GatewayConfig;
pub use forward::{error_response, forward, ForwardRequest};
pub use policy::ModelPolicy;
pub use resolver::{resolve, UpstreamTarget};
