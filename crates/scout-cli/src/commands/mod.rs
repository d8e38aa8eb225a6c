//! Command dispatch and shared helpers for the network-bound subcommands.

pub mod config_cmd;
pub mod send;
pub mod video;
pub mod vocab;
pub mod watch;

use std::time::Duration;

use scout_core::ConnectionManager;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a rover-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Send(args) => send::handle(&args, global).await,
        Command::Watch => watch::handle(global).await,
        Command::Video => video::handle(global).await,
        Command::Commands => vocab::handle(),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Close the link and wait for the socket task to flush queued frames
/// and exit, so one-shot commands aren't lost to process teardown.
pub(crate) async fn shutdown(manager: &ConnectionManager) {
    let mut state = manager.state();
    manager.close();

    let drained = async {
        while !state.borrow_and_update().is_terminal() {
            if state.changed().await.is_err() {
                break;
            }
        }
    };
    let _ = tokio::time::timeout(Duration::from_secs(5), drained).await;
}
