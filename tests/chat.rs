//! End-to-end tests of the chat WebSocket: relay, `exchange` commands and
//! the exchange log.

#![allow(clippy::panic)]

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: SocketAddr) -> Client {
    let Ok((ws, _)) = connect_async(format!("ws://{addr}/")).await else {
        panic!("ws connect failed");
    };
    ws
}

async fn send(ws: &mut Client, text: &str) {
    let Ok(()) = ws.send(Message::text(text)).await else {
        panic!("ws send failed");
    };
}

async fn recv_text(ws: &mut Client) -> String {
    loop {
        let Ok(next) = tokio::time::timeout(Duration::from_secs(5), ws.next()).await else {
            panic!("timed out waiting for a frame");
        };
        match next {
            Some(Ok(Message::Text(text))) => return text.to_string(),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

fn tempdir() -> tempfile::TempDir {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    dir
}

#[tokio::test]
async fn chat_line_reaches_every_client_with_sender_prefix() {
    let dir = tempdir();
    let rates = common::spawn_rates_api().await;
    let (addr, _state) = common::spawn_server(&common::config(&rates, dir.path())).await;

    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;

    send(&mut alice, "hi there").await;

    let to_alice = recv_text(&mut alice).await;
    let to_bob = recv_text(&mut bob).await;
    assert_eq!(to_alice, to_bob);
    assert!(to_alice.starts_with("127.0.0.1:"), "got {to_alice}");
    assert!(to_alice.ends_with(": hi there"), "got {to_alice}");
}

#[tokio::test]
async fn lines_keep_arrival_order() {
    let dir = tempdir();
    let rates = common::spawn_rates_api().await;
    let (addr, _state) = common::spawn_server(&common::config(&rates, dir.path())).await;

    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;

    for line in ["one", "two", "three"] {
        send(&mut alice, line).await;
    }
    for expected in ["one", "two", "three"] {
        let got = recv_text(&mut bob).await;
        assert!(got.ends_with(&format!(": {expected}")), "got {got}");
    }
}

#[tokio::test]
async fn invalid_exchange_is_answered_to_sender_only() {
    let dir = tempdir();
    let rates = common::spawn_rates_api().await;
    let config = common::config(&rates, dir.path());
    let (addr, _state) = common::spawn_server(&config).await;

    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;

    for bad in ["exchange", "exchange x", "exchange 1 2"] {
        send(&mut alice, bad).await;
        assert_eq!(
            recv_text(&mut alice).await,
            "Invalid command. Usage: exchange N"
        );
    }

    send(&mut alice, "marker").await;
    let to_bob = recv_text(&mut bob).await;
    assert!(to_bob.ends_with(": marker"), "bob got {to_bob}");
    assert!(!config.exchange_log_path.exists());
}

#[tokio::test]
async fn exchange_replies_with_latest_rates_and_logs() {
    let dir = tempdir();
    let rates = common::spawn_rates_api().await;
    let config = common::config(&rates, dir.path());
    let (addr, _state) = common::spawn_server(&config).await;

    let mut alice = connect(addr).await;
    send(&mut alice, "exchange 2").await;

    assert_eq!(
        recv_text(&mut alice).await,
        "USD: Buy - 38.50000, Sell - 39.10000\nPLN: Buy - 9.40000, Sell - N/A\n"
    );

    let log = common::wait_for_lines(&config.exchange_log_path, 1).await;
    assert_eq!(log.lines().count(), 1);
    assert!(log.ends_with(": 'exchange' command executed\n"), "log was {log}");
}

#[tokio::test]
async fn exchange_reports_upstream_failure() {
    let dir = tempdir();
    let rates = common::spawn_failing_rates_api().await;
    let config = common::config(&rates, dir.path());
    let (addr, _state) = common::spawn_server(&config).await;

    let mut alice = connect(addr).await;
    send(&mut alice, "exchange 1").await;

    assert_eq!(recv_text(&mut alice).await, "Failed to fetch currency data");
    common::wait_for_lines(&config.exchange_log_path, 1).await;
}

#[tokio::test]
async fn slow_exchange_does_not_hold_back_chat_lines() {
    let dir = tempdir();
    let rates = common::spawn_slow_rates_api().await;
    let config = common::config(&rates, dir.path());
    let (addr, _state) = common::spawn_server(&config).await;

    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;

    send(&mut alice, "exchange 1").await;
    send(&mut bob, "hi").await;

    let Ok(first) =
        tokio::time::timeout(common::SLOW_API_DELAY / 2, recv_text(&mut alice)).await
    else {
        panic!("chat line waited for the rates lookup");
    };
    assert!(first.ends_with(": hi"), "alice got {first}");
    assert_eq!(
        recv_text(&mut alice).await,
        "PLN: Buy - 9.40000, Sell - N/A\n"
    );
    common::wait_for_lines(&config.exchange_log_path, 1).await;
}

#[tokio::test]
async fn disconnect_unregisters_client() {
    let dir = tempdir();
    let rates = common::spawn_rates_api().await;
    let (addr, state) = common::spawn_server(&common::config(&rates, dir.path())).await;

    let mut alice = connect(addr).await;
    let bob = connect(addr).await;

    wait_for_clients(&state, 2).await;

    drop(bob);
    wait_for_clients(&state, 1).await;

    send(&mut alice, "still here").await;
    assert!(recv_text(&mut alice).await.ends_with(": still here"));
}

async fn wait_for_clients(state: &ws_chat::app_state::AppState, count: usize) {
    for _ in 0..100 {
        if state.registry.len().await == count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("registry never reached {count} clients");
}
