//! `scout watch` -- follow the connection lifecycle until it ends.

use owo_colors::OwoColorize;

use scout_core::{ConnectionManager, LinkState};

use crate::cli::GlobalOpts;
use crate::config::resolve_bot_config;
use crate::error::CliError;

fn print_state(state: LinkState) {
    match state {
        LinkState::Connecting => println!("{}", "connecting".yellow()),
        LinkState::Open => println!("{}", "open".green()),
        LinkState::Closed => println!("closed"),
        LinkState::Errored => println!("{}", "errored".red()),
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let bot = resolve_bot_config(global)?;
    let url = bot.control_url.clone();
    let manager = ConnectionManager::open(bot);

    let mut rx = manager.state();
    let mut state = *rx.borrow_and_update();
    print_state(state);

    while !state.is_terminal() {
        if rx.changed().await.is_err() {
            break;
        }
        state = *rx.borrow_and_update();
        print_state(state);
    }

    if state == LinkState::Errored {
        return Err(CliError::ConnectionFailed {
            url: url.to_string(),
            source: "connection attempt failed".into(),
        });
    }
    Ok(())
}
