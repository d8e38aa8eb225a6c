//! All possible UI actions. Actions are the sole mechanism for state mutation.

use scout_core::{Command, LinkState};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Login gate ────────────────────────────────────────────────
    /// Credentials matched; the app opens the connection and switches
    /// to the control screen.
    LoginSucceeded,

    // ── Control channel ───────────────────────────────────────────
    /// The link moved to a new lifecycle state.
    LinkStateChanged(LinkState),
    /// Fire one command token at the rover.
    SendCommand(Command),

    // ── Video feed ────────────────────────────────────────────────
    /// Result of the one-shot feed reachability probe.
    FeedProbed(Result<(), String>),
}
