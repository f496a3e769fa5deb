//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::{ChatBus, ClientRegistry};
use crate::error::ChatError;
use crate::service::{ExchangeLog, ExchangeService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connected WebSocket clients.
    pub registry: Arc<ClientRegistry>,
    /// Fan-out of chat lines to every connection.
    pub chat_bus: ChatBus,
    /// Currency rates client.
    pub exchange: ExchangeService,
    /// Log of executed `exchange` commands.
    pub exchange_log: Arc<ExchangeLog>,
}

impl AppState {
    /// Builds the state described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Upstream`] if the HTTP client cannot be built.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ChatError> {
        Ok(Self {
            registry: Arc::new(ClientRegistry::new()),
            chat_bus: ChatBus::new(config.chat_bus_capacity),
            exchange: ExchangeService::new(config.exchange_api_url.clone(), config.http_timeout)?,
            exchange_log: Arc::new(ExchangeLog::new(config.exchange_log_path.clone())),
        })
    }
}
