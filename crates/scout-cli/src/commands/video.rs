//! `scout video` -- show the feed address and probe its reachability.
//!
//! The stream itself is never consumed; point any video player at the
//! printed URL.

use owo_colors::OwoColorize;

use crate::cli::GlobalOpts;
use crate::config::resolve_bot_config;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let bot = resolve_bot_config(global)?;

    if !global.quiet {
        println!("feed {}", bot.video_url);
    }

    scout_core::probe_feed(&bot.video_url, bot.open_timeout)
        .await
        .map_err(|e| CliError::FeedUnreachable {
            url: bot.video_url.to_string(),
            reason: e.to_string(),
        })?;

    if !global.quiet {
        println!("{}", "reachable".green());
    }
    Ok(())
}
