//! Axum WebSocket upgrade handler.

use std::net::SocketAddr;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /` — Upgrade HTTP connection to a chat WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let chat_rx = state.chat_bus.subscribe();

    ws.on_upgrade(move |socket| async move {
        let client_id = state.registry.register(addr).await;
        run_connection(socket, client_id, addr, chat_rx, state).await;
    })
}
