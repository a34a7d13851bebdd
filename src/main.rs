//! chat-relay server entry point.
//!
//! Starts the broadcast hub and the Axum HTTP server in front of it.

use tracing_subscriber::EnvFilter;

use chat_relay::api;
use chat_relay::app_state::AppState;
use chat_relay::config::HubConfig;
use chat_relay::hub::HubHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = HubConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        origin = ?config.allowed_origin,
        "starting chat-relay"
    );

    // Start the hub dispatcher
    let (hub, _hub_task) =
        HubHandle::spawn(config.hub_queue_capacity, config.outbound_queue_capacity);

    // Build router
    let app = api::build_app(AppState {
        hub,
        allowed_origin: config.allowed_origin.clone(),
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "WebSocket server is running");

    axum::serve(listener, app).await?;

    Ok(())
}
