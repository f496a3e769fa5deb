//! Chat lines relayed between connected clients.

use std::net::SocketAddr;

/// One chat line published on the [`super::ChatBus`].
#[derive(Debug, Clone)]
pub struct ChatEvent {
    /// Remote address of the sender.
    pub sender: SocketAddr,
    /// Raw text as received.
    pub text: String,
}

impl ChatEvent {
    /// Creates an event for a line sent from `sender`.
    #[must_use]
    pub fn new(sender: SocketAddr, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Renders the line as delivered to clients: `"{sender}: {text}"`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}
