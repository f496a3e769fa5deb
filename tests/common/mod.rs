//! Shared helpers for integration tests: a mock rates API and a server
//! bound to an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;

use ws_chat::app_state::AppState;
use ws_chat::config::ServerConfig;
use ws_chat::server;

/// Today's quotes served by the mock API.
pub fn current_quotes() -> serde_json::Value {
    serde_json::json!([
        { "ccy": "EUR", "base_ccy": "UAH", "buy": "41.10000", "sale": "42.05000" },
        { "ccy": "USD", "base_ccy": "UAH", "buy": "38.50000", "sale": "39.10000" },
        { "ccy": "PLN", "base_ccy": "UAH", "buy": "9.40000" }
    ])
}

async fn pubinfo(RawQuery(query): RawQuery) -> impl IntoResponse {
    let query = query.unwrap_or_default();
    if query.contains("date=") {
        // Historical answers only know EUR.
        return Json(serde_json::json!([
            { "ccy": "EUR", "base_ccy": "UAH", "buy": "40.0", "sale": "41.5" }
        ]));
    }
    Json(current_quotes())
}

async fn slow_pubinfo() -> impl IntoResponse {
    tokio::time::sleep(SLOW_API_DELAY).await;
    Json(current_quotes())
}

async fn unavailable() -> impl IntoResponse {
    StatusCode::SERVICE_UNAVAILABLE
}

/// Starts a mock `pubinfo` API and returns its base URL.
pub async fn spawn_rates_api() -> String {
    let app = Router::new().route("/pubinfo", get(pubinfo));
    let addr = spawn_router(app).await;
    format!("http://{addr}/pubinfo")
}

/// Starts a rates API that always answers 503 and returns its base URL.
pub async fn spawn_failing_rates_api() -> String {
    let app = Router::new().route("/pubinfo", get(unavailable));
    let addr = spawn_router(app).await;
    format!("http://{addr}/pubinfo")
}

/// How long the slow rates API takes to answer.
pub const SLOW_API_DELAY: Duration = Duration::from_millis(1500);

/// Starts a rates API that answers after [`SLOW_API_DELAY`].
pub async fn spawn_slow_rates_api() -> String {
    let app = Router::new().route("/pubinfo", get(slow_pubinfo));
    let addr = spawn_router(app).await;
    format!("http://{addr}/pubinfo")
}

async fn spawn_router(app: Router) -> SocketAddr {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind mock listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("mock local addr");
    };
    tokio::spawn(async move { axum::serve(listener, app).await });
    addr
}

/// Test configuration using `rates_url` and a log file under `dir`.
pub fn config(rates_url: &str, dir: &Path) -> ServerConfig {
    ServerConfig {
        exchange_api_url: rates_url.to_string(),
        exchange_log_path: dir.join("exchange_logs.txt"),
        static_dir: dir.to_path_buf(),
        http_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    }
}

/// Builds the application router for `config`.
pub fn app(config: &ServerConfig) -> (Router, AppState) {
    let Ok(state) = AppState::from_config(config) else {
        panic!("state builds");
    };
    (server::build_app(state.clone(), &config.static_dir), state)
}

/// Starts the chat server on an ephemeral port.
pub async fn spawn_server(config: &ServerConfig) -> (SocketAddr, AppState) {
    let (app, state) = app(config);
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind server listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("server local addr");
    };
    tokio::spawn(server::serve(listener, app));
    (addr, state)
}

/// Waits until `path` holds `lines` lines, up to a few seconds.
pub async fn wait_for_lines(path: &Path, lines: usize) -> String {
    for _ in 0..100 {
        if let Ok(contents) = tokio::fs::read_to_string(path).await
            && contents.lines().count() >= lines
        {
            return contents;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("{} never reached {lines} lines", path.display());
}
