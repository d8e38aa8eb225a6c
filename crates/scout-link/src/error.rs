use thiserror::Error;

/// Top-level error type for the `scout-link` crate.
///
/// The control channel itself never surfaces errors to a caller -- failures
/// show up as [`LinkState`](crate::LinkState) transitions plus log lines.
/// These variants exist for the few operations that *do* have a caller
/// waiting on a result: the open-wait helper and the feed probe.
#[derive(Debug, Error)]
pub enum LinkError {
    /// WebSocket handshake or transport failure while establishing.
    #[error("control channel connection failed: {0}")]
    Connect(String),

    /// The link was closed before it ever reached `Open`.
    #[error("control channel closed before opening")]
    ClosedBeforeOpen,

    /// Waiting for the link to open exceeded the deadline.
    #[error("timed out after {timeout_secs}s waiting for the control channel")]
    Timeout { timeout_secs: u64 },

    /// HTTP transport error while probing the video feed.
    #[error("feed probe failed: {0}")]
    Probe(#[from] reqwest::Error),
}
