//! `scout send` -- one-shot command dispatch.

use owo_colors::OwoColorize;

use scout_core::ConnectionManager;

use crate::cli::{GlobalOpts, SendArgs};
use crate::commands::shutdown;
use crate::config::resolve_bot_config;
use crate::error::CliError;

pub async fn handle(args: &SendArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bot = resolve_bot_config(global)?;
    let manager = ConnectionManager::open(bot);
    manager.wait_until_open().await?;

    for cmd in &args.commands {
        manager.send(*cmd);
        if !global.quiet {
            println!("sent {}", cmd.token().green());
        }
    }

    shutdown(&manager).await;
    Ok(())
}
