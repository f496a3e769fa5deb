//! Registry of connected chat clients.
//!
//! [`ClientRegistry`] maps each live connection to its remote address.
//! Connections register after the upgrade and unregister when their loop
//! ends, whatever the reason.

use std::collections::HashMap;
use std::net::SocketAddr;

use tokio::sync::RwLock;

use super::ClientId;

/// Set of currently connected clients.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<ClientId, SocketAddr>>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new connection and returns its id.
    pub async fn register(&self, addr: SocketAddr) -> ClientId {
        let id = ClientId::new();
        self.clients.write().await.insert(id, addr);
        tracing::info!(client_id = %id, %addr, "client connected");
        id
    }

    /// Removes a connection, returning its address if it was registered.
    pub async fn unregister(&self, id: ClientId) -> Option<SocketAddr> {
        let removed = self.clients.write().await.remove(&id);
        if let Some(addr) = removed {
            tracing::info!(client_id = %id, %addr, "client disconnected");
        }
        removed
    }

    /// Returns the number of connected clients.
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Returns `true` if no client is connected.
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}
