//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use scout_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the rover at {url}")]
    #[diagnostic(
        code(scout::connection_failed),
        help(
            "Check that the rover is powered on and that this machine is\n\
             on the rover's Wi-Fi network.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Control channel closed before it opened")]
    #[diagnostic(code(scout::closed_early))]
    ClosedEarly,

    #[error("Timed out after {seconds}s waiting for the rover")]
    #[diagnostic(
        code(scout::timeout),
        help("Increase the wait with --timeout or check the rover's Wi-Fi.")
    )]
    Timeout { seconds: u64 },

    // ── Video feed ───────────────────────────────────────────────────
    #[error("Video feed unreachable at {url}")]
    #[diagnostic(
        code(scout::feed_unreachable),
        help(
            "Make sure the camera is streaming and on the same network.\n\
             Reason: {reason}"
        )
    )]
    FeedUnreachable { url: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scout::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists")]
    #[diagnostic(
        code(scout::config_exists),
        help(
            "Pass --force to overwrite it.\n\
             Path: {path}"
        )
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(scout::config))]
    Config(#[from] scout_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ClosedEarly | Self::FeedUnreachable { .. } => {
                exit_code::CONNECTION
            }
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::ClosedBeforeOpen => CliError::ClosedEarly,

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::FeedUnreachable { url, reason } => {
                CliError::FeedUnreachable { url, reason }
            }

            CoreError::LoginRejected { message } => CliError::Validation {
                field: "credentials".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_exit_with_the_connection_code() {
        let err = CliError::from(CoreError::ConnectionFailed {
            url: "ws://192.168.4.1:81".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn timeouts_have_their_own_exit_code() {
        let err = CliError::from(CoreError::Timeout { timeout_secs: 10 });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn validation_is_a_usage_error() {
        let err = CliError::Validation {
            field: "url".into(),
            reason: "invalid URL".into(),
        };
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
