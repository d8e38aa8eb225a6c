// ── Core error types ──
//
// User-facing errors from scout-core. The control channel itself never
// errors back to a caller (failed sends are logged no-ops); these cover
// the operations that do have a waiting caller: one-shot open waits, the
// feed probe, and the login gate.

use thiserror::Error;

use scout_link::LinkError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ───────────────────────────────────────────
    #[error("Cannot reach the rover at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Control channel closed before it opened")]
    ClosedBeforeOpen,

    #[error("Timed out after {timeout_secs}s waiting for the rover")]
    Timeout { timeout_secs: u64 },

    // ── Video feed ──────────────────────────────────────────────────
    #[error("Video feed unreachable at {url}: {reason}")]
    FeedUnreachable { url: String, reason: String },

    // ── Login gate ──────────────────────────────────────────────────
    /// Carries the display message verbatim.
    #[error("{message}")]
    LoginRejected { message: String },
}

impl CoreError {
    /// Attach the endpoint a link-layer failure was about.
    pub(crate) fn from_link(err: LinkError, url: &url::Url) -> Self {
        match err {
            LinkError::Connect(reason) => Self::ConnectionFailed {
                url: url.to_string(),
                reason,
            },
            LinkError::ClosedBeforeOpen => Self::ClosedBeforeOpen,
            LinkError::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            LinkError::Probe(e) => Self::FeedUnreachable {
                url: url.to_string(),
                reason: e.to_string(),
            },
        }
    }
}
