// ── Connection manager ──
//
// The one stateful component: exactly one outbound control-channel
// connection per mounted view, opened on construction and released on
// drop. Consumers observe the lifecycle through a watch channel and send
// typed commands; everything else about the rover is a fixed address.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use scout_link::{Link, LinkState, probe_feed};

use crate::command::Command;
use crate::config::BotConfig;
use crate::error::CoreError;

/// Owns the single live connection to the rover.
///
/// Construction *is* the `open()` of the lifecycle: the handshake starts
/// immediately in the background. There is no reconnect -- once the state
/// is terminal, drop this manager and build a new one.
pub struct ConnectionManager {
    config: BotConfig,
    link: Link,
}

impl ConnectionManager {
    /// Start connecting to the configured rover.
    pub fn open(config: BotConfig) -> Self {
        debug!(control = %config.control_url, "opening control channel");
        let link = Link::open(config.control_url.clone());
        Self { config, link }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    // ── State observation ───────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn state(&self) -> watch::Receiver<LinkState> {
        self.link.state()
    }

    pub fn current_state(&self) -> LinkState {
        self.link.current_state()
    }

    /// Whether sends would currently transmit.
    pub fn is_open(&self) -> bool {
        self.current_state() == LinkState::Open
    }

    /// Block (asynchronously) until the channel opens, for one-shot
    /// callers that have nothing to render meanwhile.
    pub async fn wait_until_open(&self) -> Result<(), CoreError> {
        self.link
            .wait_until_open(self.config.open_timeout)
            .await
            .map_err(|e| CoreError::from_link(e, &self.config.control_url))
    }

    // ── Command dispatch ────────────────────────────────────────────

    /// Fire one command token at the rover.
    ///
    /// Only transmits while the channel is open; otherwise this logs a
    /// warning and drops the command. No acknowledgment exists to wait
    /// for, so there is nothing to return.
    pub fn send(&self, command: Command) {
        self.link.send(command.token());
    }

    // ── Teardown ────────────────────────────────────────────────────

    /// Release the connection. Idempotent; dropping the manager does the
    /// same exactly once.
    pub fn close(&self) {
        self.link.close();
    }

    // ── Video feed ──────────────────────────────────────────────────

    /// Probe the video feed endpoint for reachability. The stream itself
    /// is never consumed here.
    pub async fn probe_feed(&self, timeout: Duration) -> Result<(), CoreError> {
        probe_feed(&self.config.video_url, timeout)
            .await
            .map_err(|e| CoreError::from_link(e, &self.config.video_url))
    }
}
