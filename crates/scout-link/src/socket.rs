//! The control channel socket: one connection, one lifecycle.
//!
//! [`Link::open`] spawns a background task that performs the WebSocket
//! handshake and then pumps outbound command tokens until the remote drops
//! or the link is closed. State changes flow through a [`tokio::sync::watch`]
//! channel so views can render a "connecting" banner without polling.
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_link::Link;
//! use std::time::Duration;
//!
//! let link = Link::open("ws://192.168.4.1:81".parse()?);
//! link.wait_until_open(Duration::from_secs(5)).await?;
//! link.send("forward");
//! link.close();
//! ```

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::{self, ClientRequestBuilder};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::LinkError;

// ── LinkState ────────────────────────────────────────────────────────

/// Observable lifecycle state of the control channel.
///
/// The only transitions are `Connecting → Open → Closed`,
/// `Connecting → Errored`, and `Open → Closed` (abrupt remote drop).
/// `Closed` and `Errored` are terminal -- a new [`Link`] must be opened
/// to reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Handshake in progress.
    Connecting,
    /// Connected; sends are transmitted.
    Open,
    /// Released, either locally or by the remote.
    Closed,
    /// The connection attempt failed.
    Errored,
}

impl LinkState {
    /// Whether this state will never change again for this link instance.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

// ── Link ─────────────────────────────────────────────────────────────

/// Handle to a single outbound control-channel connection.
///
/// Owns the background socket task. Dropping the handle closes the
/// connection exactly once; [`close`](Self::close) does the same and is
/// idempotent.
pub struct Link {
    state_rx: watch::Receiver<LinkState>,
    out_tx: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

impl Link {
    /// Start connecting to `endpoint` and return immediately.
    ///
    /// The handshake happens in the background; observe
    /// [`state`](Self::state) or use [`wait_until_open`](Self::wait_until_open)
    /// to learn the outcome. There is no retry on failure.
    pub fn open(endpoint: Url) -> Self {
        let (state_tx, state_rx) = watch::channel(LinkState::Connecting);
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            run_link(endpoint, state_tx, out_rx, task_cancel).await;
        });

        Self {
            state_rx,
            out_tx,
            cancel,
        }
    }

    /// Subscribe to state changes.
    pub fn state(&self) -> watch::Receiver<LinkState> {
        self.state_rx.clone()
    }

    /// The state as of right now.
    pub fn current_state(&self) -> LinkState {
        *self.state_rx.borrow()
    }

    /// Transmit one text frame containing `token`, if the link is open.
    ///
    /// Anything else is a logged no-op: nothing is queued, buffered, or
    /// errored back. Fire-and-forget -- the rover defines no acknowledgment.
    pub fn send(&self, token: &str) {
        if self.current_state() != LinkState::Open {
            tracing::warn!(token, state = ?self.current_state(), "dropping command, link not open");
            return;
        }
        if self.out_tx.send(token.to_owned()).is_err() {
            // Task already gone; the watch will read Closed momentarily.
            tracing::warn!(token, "dropping command, link task stopped");
        }
    }

    /// Release the connection. Idempotent; the state ends up `Closed`
    /// regardless of where the lifecycle was.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Wait until the link reaches `Open`, or fail with the reason it
    /// never will.
    pub async fn wait_until_open(&self, timeout: Duration) -> Result<(), LinkError> {
        let mut rx = self.state_rx.clone();
        let wait = async {
            loop {
                match *rx.borrow_and_update() {
                    LinkState::Open => return Ok(()),
                    LinkState::Errored => {
                        return Err(LinkError::Connect("connection attempt failed".into()));
                    }
                    LinkState::Closed => return Err(LinkError::ClosedBeforeOpen),
                    LinkState::Connecting => {}
                }
                if rx.changed().await.is_err() {
                    return Err(LinkError::ClosedBeforeOpen);
                }
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(LinkError::Timeout {
                timeout_secs: timeout.as_secs(),
            }),
        }
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Socket task ──────────────────────────────────────────────────────

/// Single connection lifecycle: handshake, pump, release.
async fn run_link(
    endpoint: Url,
    state_tx: watch::Sender<LinkState>,
    mut out_rx: mpsc::UnboundedReceiver<String>,
    cancel: CancellationToken,
) {
    tracing::info!(endpoint = %endpoint, "connecting to control channel");

    let uri: tungstenite::http::Uri = match endpoint.as_str().parse() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "invalid control endpoint");
            fail_then_await_close(state_tx, cancel).await;
            return;
        }
    };
    let request = ClientRequestBuilder::new(uri);

    let ws_stream = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!("link closed during handshake");
            let _ = state_tx.send(LinkState::Closed);
            return;
        }
        result = tokio_tungstenite::connect_async(request) => match result {
            Ok((stream, _response)) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "control channel connection failed");
                fail_then_await_close(state_tx, cancel).await;
                return;
            }
        }
    };

    tracing::info!("control channel open");
    let _ = state_tx.send(LinkState::Open);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                // Frames accepted while Open still go out ahead of the close.
                while let Ok(token) = out_rx.try_recv() {
                    if write.send(tungstenite::Message::Text(token.into())).await.is_err() {
                        break;
                    }
                }
                let _ = write.send(tungstenite::Message::Close(None)).await;
                break;
            }
            token = out_rx.recv() => {
                // All senders dropped means the handle is gone; treat as close.
                let Some(token) = token else {
                    let _ = write.send(tungstenite::Message::Close(None)).await;
                    break;
                };
                tracing::debug!(token = %token, "sending command");
                if let Err(e) = write.send(tungstenite::Message::Text(token.into())).await {
                    tracing::warn!(error = %e, "control channel dropped mid-send");
                    break;
                }
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Close(close_frame))) => {
                        if let Some(ref cf) = close_frame {
                            tracing::info!(code = %cf.code, reason = %cf.reason, "remote closed the control channel");
                        } else {
                            tracing::info!("remote closed the control channel");
                        }
                        break;
                    }
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        // No inbound schema is defined; keep the bytes visible
                        // at trace level in case firmware grows one.
                        tracing::trace!(payload = %text, "ignoring inbound text");
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        // tungstenite answers pongs automatically
                        tracing::trace!("control channel ping");
                    }
                    Some(Ok(_)) => {
                        // Binary, Pong, raw frames -- ignore
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "control channel dropped");
                        break;
                    }
                    None => {
                        tracing::info!("control channel stream ended");
                        break;
                    }
                }
            }
        }
    }

    let _ = state_tx.send(LinkState::Closed);
    tracing::debug!("link task exiting");
}

/// Mark the link `Errored`, then honor a later `close()` by moving to
/// `Closed` -- close ends in `Closed` no matter where the lifecycle was.
async fn fail_then_await_close(state_tx: watch::Sender<LinkState>, cancel: CancellationToken) {
    let _ = state_tx.send(LinkState::Errored);
    cancel.cancelled().await;
    let _ = state_tx.send(LinkState::Closed);
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(LinkState::Closed.is_terminal());
        assert!(LinkState::Errored.is_terminal());
        assert!(!LinkState::Connecting.is_terminal());
        assert!(!LinkState::Open.is_terminal());
    }

    #[tokio::test]
    async fn open_starts_in_connecting() {
        // Bound but never accepted: the handshake can't complete, so the
        // state observably stays Connecting.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let url: Url = format!("ws://{addr}").parse().expect("url");

        let link = Link::open(url);
        assert_eq!(link.current_state(), LinkState::Connecting);
        link.close();
    }

    #[tokio::test]
    async fn connect_refused_becomes_errored() {
        // Grab a free port, then drop the listener so the connect is refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let url: Url = format!("ws://{addr}").parse().expect("url");
        let link = Link::open(url);

        let err = link
            .wait_until_open(Duration::from_secs(5))
            .await
            .expect_err("connect should fail");
        assert!(matches!(err, LinkError::Connect(_)));
        assert_eq!(link.current_state(), LinkState::Errored);
    }

    #[tokio::test]
    async fn unusable_endpoint_becomes_errored() {
        // A scheme the transport refuses fails the same way a refused
        // connect does: Errored state, Connect error for waiting callers.
        let url: Url = "ftp://127.0.0.1:21".parse().expect("url");
        let link = Link::open(url);

        let err = link
            .wait_until_open(Duration::from_secs(5))
            .await
            .expect_err("scheme should be rejected");
        assert!(matches!(err, LinkError::Connect(_)));
        assert_eq!(link.current_state(), LinkState::Errored);
    }

    #[tokio::test]
    async fn close_before_open_reports_closed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let url: Url = format!("ws://{addr}").parse().expect("url");

        let link = Link::open(url);
        link.close();

        let err = link
            .wait_until_open(Duration::from_secs(5))
            .await
            .expect_err("closed before open");
        assert!(matches!(err, LinkError::ClosedBeforeOpen));
    }
}
