//! Broadcast channel for chat lines.
//!
//! [`ChatBus`] wraps a [`tokio::sync::broadcast`] channel. Every relayed
//! chat line is published through the bus, and every WebSocket connection
//! subscribes to it on connect.

use tokio::sync::broadcast;

use super::ChatEvent;

/// Broadcast bus for [`ChatEvent`]s.
///
/// When the ring buffer is full, the oldest lines are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct ChatBus {
    sender: broadcast::Sender<ChatEvent>,
}

impl ChatBus {
    /// Creates a new `ChatBus` with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a line to all subscribers.
    ///
    /// Returns the number of receivers that got the line. With no active
    /// receivers the line is dropped.
    pub fn publish(&self, event: ChatEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a receiver for all future lines.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.sender.subscribe()
    }
}
