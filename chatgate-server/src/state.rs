use std::sync::Arc;

use chatgate_gateway::GatewayConfig;

/// Shared handles for request handlers. Cheap to clone; the `reqwest`
/// client pools connections internally.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config: Arc::new(config), http: reqwest::Client::new() }
    }
}
