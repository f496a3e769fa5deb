//! Read/write loop of one chat connection.
//!
//! Rate lookups for `exchange` run on their own task and report back over
//! a per-connection channel, so a slow rates API never holds back chat
//! lines to this client. Replies to several pending `exchange` commands
//! arrive in completion order.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use super::command::{EXCHANGE_USAGE, Inbound, classify};
use crate::app_state::AppState;
use crate::domain::{ChatEvent, ClientId};

type WsSink = SplitSink<WebSocket, Message>;

/// Pending `exchange` replies per connection.
const PENDING_REPLIES: usize = 16;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Chat lines from the client are published on the chat bus.
/// - `exchange` commands are answered to this client only.
/// - Every line on the bus is forwarded to the client.
///
/// The client is unregistered when the loop ends.
pub async fn run_connection(
    socket: WebSocket,
    client_id: ClientId,
    addr: SocketAddr,
    mut chat_rx: broadcast::Receiver<ChatEvent>,
    state: AppState,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (reply_tx, mut reply_rx) = mpsc::channel::<String>(PENDING_REPLIES);

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if handle_text(text.as_str(), client_id, addr, &state, &reply_tx, &mut ws_tx)
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(client_id = %client_id, error = %err, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            Some(reply) = reply_rx.recv() => {
                if ws_tx.send(Message::text(reply)).await.is_err() {
                    break;
                }
                if let Err(err) = state.exchange_log.record().await {
                    tracing::warn!(
                        error = %err,
                        path = %state.exchange_log.path().display(),
                        "failed to record exchange command"
                    );
                }
            }
            event = chat_rx.recv() => {
                match event {
                    Ok(event) => {
                        if ws_tx.send(Message::text(event.to_wire())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(client_id = %client_id, lagged = n, "ws client lagged behind chat bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    state.registry.unregister(client_id).await;
}

/// Handles one text frame. An `Err` means the client can no longer be
/// written to.
async fn handle_text(
    text: &str,
    client_id: ClientId,
    addr: SocketAddr,
    state: &AppState,
    reply_tx: &mpsc::Sender<String>,
    ws_tx: &mut WsSink,
) -> Result<(), axum::Error> {
    match classify(text) {
        Ok(Inbound::Chat(line)) => {
            let delivered = state.chat_bus.publish(ChatEvent::new(addr, line));
            tracing::debug!(client_id = %client_id, delivered, "chat line relayed");
        }
        Ok(Inbound::Exchange { days }) => {
            let exchange = state.exchange.clone();
            let reply_tx = reply_tx.clone();
            tokio::spawn(async move {
                let reply = exchange.current_rates(days).await;
                // The connection may have closed while the rates were fetched.
                let _ = reply_tx.send(reply).await;
            });
        }
        Err(err) => {
            tracing::debug!(client_id = %client_id, error = %err, "rejected chat command");
            ws_tx.send(Message::text(EXCHANGE_USAGE)).await?;
        }
    }
    Ok(())
}
