//! Domain layer: connection identity, chat lines and their fan-out.
//!
//! This module contains the server-side chat model: client identity, the
//! registry of connected clients, the bus that broadcasts chat lines to
//! every connection, and the currency rate types of the rates API.

pub mod chat_bus;
pub mod chat_event;
pub mod client_id;
pub mod client_registry;
pub mod rates;

pub use chat_bus::ChatBus;
pub use chat_event::ChatEvent;
pub use client_id::ClientId;
pub use client_registry::ClientRegistry;
pub use rates::{DailyRate, RateHistoryDay, RateQuote};
