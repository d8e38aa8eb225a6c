//! `scout-tui` -- terminal dashboard for driving the scout rover.
//!
//! Two screens: a login gate and the control view. After login the app
//! opens one control-channel connection to the rover and drives it with
//! the keyboard; the video feed address is shown alongside so an external
//! player can render it.
//!
//! Logs are written to a file (default `/tmp/scout-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod link_bridge;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scout_core::BotConfig;

use crate::app::App;

/// Terminal dashboard for driving the scout rover.
#[derive(Parser, Debug)]
#[command(name = "scout-tui", version, about)]
struct Cli {
    /// Control channel URL (e.g., ws://192.168.4.1:81)
    #[arg(short = 'u', long, env = "SCOUT_BOT_CONTROL")]
    url: Option<String>,

    /// Video feed URL shown on the control screen
    #[arg(long, env = "SCOUT_BOT_VIDEO")]
    video_url: Option<String>,

    /// Log file path (defaults to /tmp/scout-tui.log)
    #[arg(long, default_value = "/tmp/scout-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr -- that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scout_tui={log_level},scout_core={log_level},scout_link={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("scout-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the rover addresses: config file first, CLI flags override.
fn build_bot_config(cli: &Cli, cfg: &scout_config::Config) -> Result<BotConfig> {
    let mut bot = scout_config::to_bot_config(cfg)?;

    if let Some(url) = cli.url.as_deref() {
        bot.control_url = url.parse().wrap_err_with(|| format!("invalid control URL: {url}"))?;
    }
    if let Some(url) = cli.video_url.as_deref() {
        bot.video_url = url.parse().wrap_err_with(|| format!("invalid video URL: {url}"))?;
    }

    Ok(bot)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file -- hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let cfg = scout_config::load_config_or_default();
    let bot = build_bot_config(&cli, &cfg)?;
    let gate = scout_config::to_login_gate(&cfg);

    info!(control = %bot.control_url, video = %bot.video_url, "starting scout-tui");

    let mut app = App::new(bot, gate);
    app.run().await?;

    Ok(())
}
