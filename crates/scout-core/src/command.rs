//! The rover's command vocabulary.
//!
//! Nine fixed tokens, split between drive motors and the camera pan-tilt
//! mount. The wire form is the snake_case token exactly as the firmware
//! expects it; there is no versioning and no arguments.

use strum::{Display, EnumIter, EnumString};

/// A command token understood by the rover firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
    PanLeft,
    PanRight,
    TiltUp,
    TiltDown,
}

/// Which subsystem a command drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Drive motors.
    Drive,
    /// Camera pan-tilt mount.
    Camera,
}

impl Command {
    /// All tokens, drive commands first.
    pub const ALL: [Command; 9] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::Stop,
        Self::PanLeft,
        Self::PanRight,
        Self::TiltUp,
        Self::TiltDown,
    ];

    /// The exact wire token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
            Self::Stop => "stop",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::TiltUp => "tilt_up",
            Self::TiltDown => "tilt_down",
        }
    }

    pub fn kind(self) -> CommandKind {
        match self {
            Self::Forward | Self::Backward | Self::Left | Self::Right | Self::Stop => {
                CommandKind::Drive
            }
            Self::PanLeft | Self::PanRight | Self::TiltUp | Self::TiltDown => CommandKind::Camera,
        }
    }

    /// Human-readable label for UI affordances.
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Backward => "Backward",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Stop => "Stop",
            Self::PanLeft => "Pan left",
            Self::PanRight => "Pan right",
            Self::TiltUp => "Tilt up",
            Self::TiltDown => "Tilt down",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_tokens_match_the_firmware_vocabulary() {
        let tokens: Vec<&str> = Command::ALL.iter().map(|c| c.token()).collect();
        assert_eq!(
            tokens,
            vec![
                "forward", "backward", "left", "right", "stop", "pan_left", "pan_right",
                "tilt_up", "tilt_down",
            ]
        );
    }

    #[test]
    fn display_matches_token() {
        for cmd in Command::iter() {
            assert_eq!(cmd.to_string(), cmd.token());
        }
    }

    #[test]
    fn tokens_parse_back() {
        for cmd in Command::iter() {
            assert_eq!(Command::from_str(cmd.token()).ok(), Some(cmd));
        }
        assert!(Command::from_str("warp_speed").is_err());
    }

    #[test]
    fn all_covers_every_variant() {
        assert_eq!(Command::ALL.len(), Command::iter().count());
    }

    #[test]
    fn kinds_split_drive_and_camera() {
        assert_eq!(Command::Stop.kind(), CommandKind::Drive);
        assert_eq!(Command::PanLeft.kind(), CommandKind::Camera);
        assert_eq!(Command::TiltDown.kind(), CommandKind::Camera);
        let drive = Command::ALL.iter().filter(|c| c.kind() == CommandKind::Drive);
        assert_eq!(drive.count(), 5);
    }
}
