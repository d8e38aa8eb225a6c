//! Clap derive structures for the `scout` CLI.
//!
//! Defines the command tree and global flags shared by every subcommand.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scout -- drive the scout rover from the command line
#[derive(Debug, Parser)]
#[command(
    name = "scout",
    version,
    about = "Drive the scout rover from the command line",
    long_about = "One-shot control of the scout rover over its WebSocket\n\
        control channel. Commands are fire-and-forget tokens; the rover\n\
        sends no acknowledgments back.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Control channel URL (overrides config)
    #[arg(long, short = 'u', env = "SCOUT_BOT_CONTROL", global = true)]
    pub url: Option<String>,

    /// Video feed URL (overrides config)
    #[arg(long, env = "SCOUT_BOT_VIDEO", global = true)]
    pub video_url: Option<String>,

    /// Seconds to wait for the control channel to open
    #[arg(long, env = "SCOUT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one or more command tokens to the rover
    #[command(alias = "s")]
    Send(SendArgs),

    /// Watch the connection lifecycle until it ends
    Watch,

    /// List the rover's command vocabulary
    Commands,

    /// Show the video feed address and probe its reachability
    Video,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Subcommand args ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Command tokens, sent in order (run `scout commands` to list them)
    #[arg(required = true, value_parser = parse_token)]
    pub commands: Vec<scout_core::Command>,
}

fn parse_token(s: &str) -> Result<scout_core::Command, String> {
    s.parse()
        .map_err(|_| format!("unknown command '{s}' (run `scout commands` to list them)"))
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_vocabulary_token_parses() {
        for cmd in scout_core::Command::ALL {
            assert_eq!(parse_token(cmd.token()), Ok(cmd));
        }
        assert!(parse_token("warp_speed").is_err());
    }
}
