//! ws-chat server entry point.
//!
//! Starts the Axum server with the chat WebSocket and REST endpoints.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

#[cfg(not(target_arch = "wasm32"))]
use ws_chat::app_state::AppState;
#[cfg(not(target_arch = "wasm32"))]
use ws_chat::config::ServerConfig;
#[cfg(not(target_arch = "wasm32"))]
use ws_chat::server;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting ws-chat");

    let state = AppState::from_config(&config)?;
    let app = server::build_app(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        exchange_log = %config.exchange_log_path.display(),
        "server listening"
    );

    server::serve(listener, app).await?;

    Ok(())
}

// The browser client starts from the library's wasm entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
