//! Control-channel tests against a loopback WebSocket server.
//!
//! The server side is a plain `tokio-tungstenite` acceptor that records
//! every text frame it receives, which lets these tests pin down the
//! exactly-once transmission guarantees without a rover on the network.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use scout_link::{Link, LinkError, LinkState};

const OPEN_WAIT: Duration = Duration::from_secs(5);

// ── Loopback server ─────────────────────────────────────────────────

/// Accept one WebSocket connection and collect its text frames until the
/// peer closes. Returns the endpoint URL and a handle resolving to the
/// collected frames.
async fn spawn_collector() -> (Url, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let mut received = Vec::new();
        while let Some(frame) = ws.next().await {
            match frame {
                Ok(Message::Text(text)) => received.push(text.to_string()),
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
        received
    });

    let url = format!("ws://{addr}").parse().unwrap();
    (url, handle)
}

/// Accept one connection, then immediately close it from the server side.
async fn spawn_closer() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        use futures_util::SinkExt;
        ws.send(Message::Close(None)).await.unwrap();
        // Drain until the close handshake completes.
        while let Some(frame) = ws.next().await {
            if frame.is_err() {
                break;
            }
        }
    });

    format!("ws://{addr}").parse().unwrap()
}

async fn wait_for_state(link: &Link, wanted: LinkState) {
    let mut rx = link.state();
    tokio::time::timeout(OPEN_WAIT, async {
        loop {
            if *rx.borrow_and_update() == wanted {
                return;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap_or_else(|_| panic!("link never reached {wanted:?}"));
}

// ── Transmission guarantees ─────────────────────────────────────────

#[tokio::test]
async fn sends_while_open_transmit_exactly_once() {
    let (url, server) = spawn_collector().await;

    let link = Link::open(url);
    link.wait_until_open(OPEN_WAIT).await.unwrap();

    for token in ["forward", "pan_left", "stop"] {
        link.send(token);
    }
    link.close();
    wait_for_state(&link, LinkState::Closed).await;

    let received = server.await.unwrap();
    assert_eq!(received, vec!["forward", "pan_left", "stop"]);
}

#[tokio::test]
async fn send_while_connecting_transmits_nothing() {
    // Bound but never accepted: the handshake can't complete.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url: Url = format!("ws://{addr}").parse().unwrap();

    let link = Link::open(url);
    assert_eq!(link.current_state(), LinkState::Connecting);
    link.send("forward");
    link.close();
    wait_for_state(&link, LinkState::Closed).await;

    // Nothing was ever upgraded; accepting now would block forever.
    drop(listener);
}

#[tokio::test]
async fn send_after_close_transmits_nothing() {
    let (url, server) = spawn_collector().await;

    let link = Link::open(url);
    link.wait_until_open(OPEN_WAIT).await.unwrap();

    link.close();
    wait_for_state(&link, LinkState::Closed).await;
    link.send("backward");

    let received = server.await.unwrap();
    assert!(received.is_empty(), "nothing should be transmitted after close");
}

#[tokio::test]
async fn send_while_errored_transmits_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let link = Link::open(format!("ws://{addr}").parse().unwrap());
    let err = link.wait_until_open(OPEN_WAIT).await.unwrap_err();
    assert!(matches!(err, LinkError::Connect(_)));

    // No connection exists; this must be a silent no-op.
    link.send("tilt_up");
    assert_eq!(link.current_state(), LinkState::Errored);
}

// ── Lifecycle transitions ───────────────────────────────────────────

#[tokio::test]
async fn handshake_success_transitions_connecting_to_open() {
    let (url, server) = spawn_collector().await;

    let link = Link::open(url);
    assert_eq!(link.current_state(), LinkState::Connecting);
    link.wait_until_open(OPEN_WAIT).await.unwrap();
    assert_eq!(link.current_state(), LinkState::Open);

    link.close();
    server.await.unwrap();
}

#[tokio::test]
async fn remote_close_transitions_open_to_closed() {
    let url = spawn_closer().await;

    let link = Link::open(url);
    link.wait_until_open(OPEN_WAIT).await.unwrap();

    wait_for_state(&link, LinkState::Closed).await;
    assert_eq!(link.current_state(), LinkState::Closed);
}

#[tokio::test]
async fn close_is_idempotent() {
    let (url, server) = spawn_collector().await;

    let link = Link::open(url);
    link.wait_until_open(OPEN_WAIT).await.unwrap();

    link.close();
    wait_for_state(&link, LinkState::Closed).await;
    assert_eq!(link.current_state(), LinkState::Closed);

    link.close();
    assert_eq!(link.current_state(), LinkState::Closed);

    server.await.unwrap();
}

#[tokio::test]
async fn close_overrides_errored() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let link = Link::open(format!("ws://{addr}").parse().unwrap());
    link.wait_until_open(OPEN_WAIT).await.unwrap_err();
    assert_eq!(link.current_state(), LinkState::Errored);

    link.close();
    wait_for_state(&link, LinkState::Closed).await;
}

#[tokio::test]
async fn drop_closes_the_connection_exactly_once() {
    let (url, server) = spawn_collector().await;

    let link = Link::open(url);
    link.wait_until_open(OPEN_WAIT).await.unwrap();
    drop(link);

    // The collector only resolves once the connection closes; a hang here
    // would mean drop leaked the socket.
    let received = tokio::time::timeout(OPEN_WAIT, server)
        .await
        .expect("server should observe the close")
        .unwrap();
    assert!(received.is_empty());
}
