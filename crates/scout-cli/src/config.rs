//! Resolve the effective rover addresses: config file, then CLI overrides.

use std::time::Duration;

use scout_core::BotConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `BotConfig` from the config file with CLI flag overrides applied.
pub fn resolve_bot_config(global: &GlobalOpts) -> Result<BotConfig, CliError> {
    let cfg = scout_config::load_config_or_default();
    let mut bot = scout_config::to_bot_config(&cfg)?;

    if let Some(ref url) = global.url {
        bot.control_url = url.parse().map_err(|_| CliError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {url}"),
        })?;
    }
    if let Some(ref url) = global.video_url {
        bot.video_url = url.parse().map_err(|_| CliError::Validation {
            field: "video-url".into(),
            reason: format!("invalid URL: {url}"),
        })?;
    }
    if let Some(secs) = global.timeout {
        bot.open_timeout = Duration::from_secs(secs);
    }

    Ok(bot)
}
