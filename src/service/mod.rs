//! Service layer: currency rate lookups and the exchange command log.

pub mod exchange_log;
pub mod exchange_service;

pub use exchange_log::ExchangeLog;
pub use exchange_service::ExchangeService;
