//! Chatgate daemon.
//!
//! A pass-through HTTP gateway: requests to /api/openai/* are classified by
//! their bearer credential, checked against the model admission policy, and
//! relayed to the matching upstream with the response streamed back.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod router;
mod state;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = chatgate_gateway::GatewayConfig::from_env();
    tracing::info!(base_url = ?config.base_url, restricted_model = ?config.restricted_model, "gateway configured");

    let app = router::build_router(AppState::new(config));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
