//! Link bridge -- forwards connection state changes into the action loop.
//!
//! Runs as a background task after login: watches the manager's state
//! channel and turns every transition into an [`Action`]. Stops on
//! cancellation, when the state turns terminal, or when the link task
//! goes away.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use scout_core::LinkState;

use crate::action::Action;

/// Forward link state transitions to the TUI until the link dies.
pub async fn run(
    mut state_rx: watch::Receiver<LinkState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    // Push the current state so the screen renders correctly immediately.
    let initial = *state_rx.borrow_and_update();
    let _ = action_tx.send(Action::LinkStateChanged(initial));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *state_rx.borrow_and_update();
                let _ = action_tx.send(Action::LinkStateChanged(state));
                if state.is_terminal() {
                    break;
                }
            }
        }
    }

    debug!("link bridge shut down");
}
