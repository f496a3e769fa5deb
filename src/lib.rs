//! # ws-chat
//!
//! A small WebSocket chat: a browser client compiled to wasm and the
//! relay server it talks to.
//!
//! The server relays every text frame to all connected clients, prefixed
//! with the sender's address, and answers `exchange N` with the latest
//! PrivatBank currency rates. A REST endpoint reports EUR/USD rates for
//! the last few days.
//!
//! ## Architecture
//!
//! ```text
//! Browser (client/, wasm32)
//!     │  ws://localhost:8080
//!     ├── WS Handler (ws/) ──── REST Handlers (api/)
//!     │
//!     ├── ChatBus, ClientRegistry (domain/)
//!     ├── ExchangeService, ExchangeLog (service/)
//!     │
//!     └── PrivatBank pubinfo API
//! ```

pub mod client;

#[cfg(not(target_arch = "wasm32"))]
pub mod api;
#[cfg(not(target_arch = "wasm32"))]
pub mod app_state;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod domain;
#[cfg(not(target_arch = "wasm32"))]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
#[cfg(not(target_arch = "wasm32"))]
pub mod service;
#[cfg(not(target_arch = "wasm32"))]
pub mod ws;
