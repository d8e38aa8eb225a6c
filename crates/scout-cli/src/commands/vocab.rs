//! `scout commands` -- list the rover's command vocabulary.

use owo_colors::OwoColorize;

use scout_core::{Command, CommandKind};

use crate::error::CliError;

pub fn handle() -> Result<(), CliError> {
    for cmd in Command::ALL {
        let kind = match cmd.kind() {
            CommandKind::Drive => "drive ",
            CommandKind::Camera => "camera",
        };
        // Pad before styling so the escape codes don't skew the columns
        println!(
            "{}  {}  {}",
            format!("{:<10}", cmd.token()).cyan(),
            kind.dimmed(),
            cmd.label()
        );
    }
    Ok(())
}
