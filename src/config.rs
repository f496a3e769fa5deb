//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default PrivatBank public rates endpoint.
pub const DEFAULT_EXCHANGE_API_URL: &str = "https://api.privatbank.ua/p24api/pubinfo";

/// Top-level server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP/WebSocket server to.
    pub listen_addr: SocketAddr,

    /// Base URL of the currency rates API (without query string).
    pub exchange_api_url: String,

    /// File that executed `exchange` commands are appended to.
    pub exchange_log_path: PathBuf,

    /// Capacity of the chat broadcast channel.
    pub chat_bus_capacity: usize,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Timeout for upstream HTTP requests.
    pub http_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            exchange_api_url: DEFAULT_EXCHANGE_API_URL.to_string(),
            exchange_log_path: PathBuf::from("exchange_logs.txt"),
            chat_bus_capacity: 1024,
            static_dir: PathBuf::from("static"),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the [`Default`] values when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let exchange_api_url =
            std::env::var("EXCHANGE_API_URL").unwrap_or(defaults.exchange_api_url);
        let exchange_log_path = std::env::var("EXCHANGE_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.exchange_log_path);
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let chat_bus_capacity = parse_env("CHAT_BUS_CAPACITY", defaults.chat_bus_capacity).max(1);
        let http_timeout = Duration::from_secs(parse_env(
            "HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
        ));

        Ok(Self {
            listen_addr,
            exchange_api_url,
            exchange_log_path,
            chat_bus_capacity,
            static_dir,
            http_timeout,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chat_endpoint() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr.port(), 8080);
        assert!(config.listen_addr.ip().is_loopback());
        assert_eq!(config.exchange_api_url, DEFAULT_EXCHANGE_API_URL);
        assert_eq!(config.exchange_log_path, PathBuf::from("exchange_logs.txt"));
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: usize = parse_env("WS_CHAT_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
